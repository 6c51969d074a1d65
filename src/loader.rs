use crate::car::{CarId, CarRecord};
use crate::error::{CarTableError, CtResult};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Payload shapes accepted for JSON input: a bare list of records, or the
/// scraping endpoint's `{ "message": ..., "result": [...] }` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum CarPayload {
    List(Vec<CarRecord>),
    Envelope { result: Vec<CarRecord> },
}

pub fn load_cars_json<R: Read>(reader: R) -> CtResult<Vec<CarRecord>> {
    let payload: CarPayload = serde_json::from_reader(reader)?;
    let cars = match payload {
        CarPayload::List(cars) => cars,
        CarPayload::Envelope { result } => result,
    };
    debug!("Loaded {} cars from JSON", cars.len());
    Ok(assign_ids(cars))
}

/// Reads cars from CSV whose headers are the record's camelCase field names.
///
/// Rows that fail to decode are skipped and counted.
pub fn load_cars_csv<R: Read>(reader: R) -> CtResult<Vec<CarRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cars = Vec::new();
    let mut skipped = 0;
    for (row_idx, result) in rdr.deserialize::<CarRecord>().enumerate() {
        match result {
            Ok(car) => cars.push(car),
            Err(e) => {
                skipped += 1;
                warn!("[Row {}] CSV Parse Error: {}", row_idx + 1, e);
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} invalid rows in car CSV.", skipped);
    }
    debug!("Loaded {} cars from CSV", cars.len());
    Ok(assign_ids(cars))
}

/// Loads by file extension: `.csv` as CSV, anything else as JSON.
pub fn load_cars_from_file<P: AsRef<Path>>(path: P) -> CtResult<Vec<CarRecord>> {
    let path = path.as_ref();
    info!("Loading cars from {}", path.display());
    let file = File::open(path).map_err(|e| {
        CarTableError::Config(format!("Could not open car list at '{}': {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        load_cars_csv(reader)
    } else {
        load_cars_json(reader)
    }
}

/// Gives every record a unique id. Records without one, and any repeat of an
/// id already seen earlier in the list, get the next free id above the maximum.
pub fn assign_ids(mut cars: Vec<CarRecord>) -> Vec<CarRecord> {
    let mut next = cars
        .iter()
        .filter_map(|c| c.id)
        .map(|id| id.0)
        .max()
        .unwrap_or(0)
        + 1;

    let mut seen = HashSet::new();
    for car in cars.iter_mut() {
        match car.id {
            Some(id) if seen.insert(id) => continue,
            Some(id) => warn!("Duplicate car id {} ({}), renumbered to #{}", id, car.model, next),
            None => {}
        }
        car.id = Some(CarId(next));
        next += 1;
    }
    cars
}

/// Keeps cars matching every given filter (case-insensitive, exact).
pub fn filter_cars(
    cars: Vec<CarRecord>,
    brand: Option<&str>,
    fuel_type: Option<&str>,
) -> Vec<CarRecord> {
    let matches = |value: &str, wanted: Option<&str>| {
        wanted.map_or(true, |w| value.trim().eq_ignore_ascii_case(w.trim()))
    };
    cars.into_iter()
        .filter(|c| matches(&c.brand, brand) && matches(&c.fuel_type, fuel_type))
        .collect()
}
