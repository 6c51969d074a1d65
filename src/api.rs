use crate::aggregate::{self, ChartRow, ScoreCard, ScoreReport};
use crate::car::{sample_cars, CarId, CarRecord};
use crate::config::ScoringWeights;
use crate::error::{CarTableError, CtResult};
use crate::loader::{assign_ids, load_cars_json};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info, warn};

/// The car list a comparison UI edits, plus the weights it is scored with.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    cars: Vec<CarRecord>,
    /// Next id `add_car` hands out; only ever grows, so removed ids stay retired.
    next_id: u64,
    pub weights: ScoringWeights,
}

impl Default for ComparisonSession {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ComparisonSession {
    pub fn new(cars: Vec<CarRecord>, weights: ScoringWeights) -> Self {
        let cars = assign_ids(cars);
        let next_id = cars.iter().filter_map(|c| c.id).map(|id| id.0).max().unwrap_or(0) + 1;
        Self {
            cars,
            next_id,
            weights,
        }
    }

    /// A session holding the sample cars, as a first visit shows.
    pub fn seeded() -> Self {
        Self::new(sample_cars(), ScoringWeights::default())
    }

    /// Restores a saved session; falls back to the sample cars when nothing usable is stored.
    pub fn open_or_seed<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No saved session at {}", path.display());
            return Self::seeded();
        }
        match Self::load(path) {
            Ok(session) if !session.cars.is_empty() => session,
            Ok(_) => Self::seeded(),
            Err(e) => {
                warn!("Ignoring unreadable session {}: {}", path.display(), e);
                Self::seeded()
            }
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> CtResult<Self> {
        let path = path.as_ref();
        info!("Restoring session from {}", path.display());
        let file = File::open(path)?;
        let cars = load_cars_json(BufReader::new(file))?;
        Ok(Self::new(cars, ScoringWeights::default()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> CtResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.cars)?;
        debug!("Saved {} cars to {}", self.cars.len(), path.display());
        Ok(())
    }

    pub fn cars(&self) -> &[CarRecord] {
        &self.cars
    }

    pub fn get(&self, id: CarId) -> Option<&CarRecord> {
        self.cars.iter().find(|c| c.id == Some(id))
    }

    /// Appends `car` under a fresh id, returned to the caller.
    pub fn add_car(&mut self, mut car: CarRecord) -> CarId {
        let id = CarId(self.next_id);
        self.next_id += 1;
        car.id = Some(id);
        self.cars.push(car);
        id
    }

    /// Sets one field by its camelCase name, e.g. `("maxPower", "120 bhp")`.
    ///
    /// The value is decoded with the same lenient rules as loaded records.
    pub fn update_field(&mut self, id: CarId, field: &str, value: Value) -> CtResult<()> {
        if field == "id" {
            return Err(CarTableError::Validation("the id field is read-only".into()));
        }
        let idx = self
            .cars
            .iter()
            .position(|c| c.id == Some(id))
            .ok_or_else(|| CarTableError::Validation(format!("no car with id {}", id)))?;

        let mut object = match serde_json::to_value(&self.cars[idx])? {
            Value::Object(map) => map,
            _ => return Err(CarTableError::Validation("car did not serialize to an object".into())),
        };
        if !object.contains_key(field) {
            return Err(CarTableError::Validation(format!("unknown field '{}'", field)));
        }
        object.insert(field.to_string(), value);

        let updated: CarRecord = serde_json::from_value(Value::Object(object))?;
        self.cars[idx] = updated;
        Ok(())
    }

    pub fn remove_car(&mut self, id: CarId) -> Option<CarRecord> {
        let idx = self.cars.iter().position(|c| c.id == Some(id))?;
        Some(self.cars.remove(idx))
    }

    pub fn score_cards(&self) -> Vec<ScoreCard> {
        aggregate::score_cards(&self.cars, &self.weights)
    }

    pub fn chart(&self) -> Vec<ChartRow> {
        aggregate::calculate_scores(&self.cars, &self.weights)
    }

    pub fn report(&self) -> ScoreReport {
        ScoreReport::build(&self.cars, &self.weights)
    }
}
