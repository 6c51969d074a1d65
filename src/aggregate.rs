use crate::car::{CarId, CarRecord};
use crate::config::ScoringWeights;
use crate::error::{CarTableError, CtResult};
use crate::scorer::{Category, POLICY_VERSION};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::warn;

/// All seven category scores of one car.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub engine_score: f64,
    pub safety_score: f64,
    pub interior_score: f64,
    pub exterior_score: f64,
    pub feature_score: f64,
    pub dimension_weight_score: f64,
    pub capacity_score: f64,
}

impl ScoreCard {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Engine => self.engine_score,
            Category::Safety => self.safety_score,
            Category::Interior => self.interior_score,
            Category::Exterior => self.exterior_score,
            Category::Features => self.feature_score,
            Category::DimensionWeight => self.dimension_weight_score,
            Category::Capacity => self.capacity_score,
        }
    }

    fn set(&mut self, category: Category, score: f64) {
        let slot = match category {
            Category::Engine => &mut self.engine_score,
            Category::Safety => &mut self.safety_score,
            Category::Interior => &mut self.interior_score,
            Category::Exterior => &mut self.exterior_score,
            Category::Features => &mut self.feature_score,
            Category::DimensionWeight => &mut self.dimension_weight_score,
            Category::Capacity => &mut self.capacity_score,
        };
        *slot = score;
    }

    /// Unweighted mean of the seven categories, one decimal.
    pub fn overall(&self) -> f64 {
        let sum: f64 = Category::iter().map(|c| self.get(c)).sum();
        crate::scorer::finalize(sum / Category::iter().count() as f64)
    }
}

/// The original record extended with its category scores.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoredCar {
    #[serde(flatten)]
    pub car: CarRecord,
    #[serde(flatten)]
    pub scores: ScoreCard,
}

/// Scores of every car, aligned with `cars` by position.
pub fn score_cards(cars: &[CarRecord], weights: &ScoringWeights) -> Vec<ScoreCard> {
    let mut cards = vec![ScoreCard::default(); cars.len()];
    for category in Category::iter() {
        for (card, scored) in cards.iter_mut().zip(category.score(cars, weights)) {
            card.set(category, scored.score);
        }
    }
    cards
}

/// One chart column: a car's score in the row's category.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartColumn {
    pub id: Option<CarId>,
    pub model: String,
    pub score: f64,
}

/// One category of the comparison chart, one column per car in input order.
///
/// Serializes as `{"category": <display name>, <model>: <score>, ...}`. Columns
/// sharing a model name collapse onto one key, the later car winning.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub category: Category,
    pub columns: Vec<ChartColumn>,
}

impl ChartRow {
    /// Score under the `model` key, as a chart reading the serialized row would see it.
    pub fn get(&self, model: &str) -> Option<f64> {
        self.columns
            .iter()
            .rev()
            .find(|c| c.model == model)
            .map(|c| c.score)
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "category".to_string(),
            Value::String(self.category.to_string()),
        );
        for column in &self.columns {
            map.insert(column.model.clone(), Value::from(column.score));
        }
        Value::Object(map)
    }
}

impl Serialize for ChartRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Models that appear more than once, in first-seen order.
pub fn duplicate_models(cars: &[CarRecord]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut dups = Vec::new();
    for car in cars {
        let count = seen.entry(car.model.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            dups.push(car.model.clone());
        }
    }
    dups
}

fn warn_duplicates(dups: &[String]) {
    if !dups.is_empty() {
        warn!(
            "duplicate model names {:?}: chart columns keyed by model will overlap",
            dups
        );
    }
}

/// Fails on duplicate models when `strict`, otherwise only logs them.
pub fn check_duplicate_models(cars: &[CarRecord], strict: bool) -> CtResult<()> {
    let dups = duplicate_models(cars);
    if strict && !dups.is_empty() {
        return Err(CarTableError::Validation(format!(
            "model names must be unique within a comparison, repeated: {}",
            dups.join(", ")
        )));
    }
    warn_duplicates(&dups);
    Ok(())
}

/// Pivots per-car scores into one row per category, ready for a multi-series chart.
///
/// Scores are joined to cars by position, so every column carries the right car's
/// score. The serialized form is keyed by `model`; duplicate models are logged
/// because the chart can then only show one of them.
pub fn calculate_scores(cars: &[CarRecord], weights: &ScoringWeights) -> Vec<ChartRow> {
    warn_duplicates(&duplicate_models(cars));
    pivot(cars, &score_cards(cars, weights))
}

/// As [`calculate_scores`], but refuses comparison sets with duplicate models.
pub fn calculate_scores_strict(
    cars: &[CarRecord],
    weights: &ScoringWeights,
) -> CtResult<Vec<ChartRow>> {
    check_duplicate_models(cars, true)?;
    Ok(pivot(cars, &score_cards(cars, weights)))
}

pub fn pivot(cars: &[CarRecord], cards: &[ScoreCard]) -> Vec<ChartRow> {
    Category::iter()
        .map(|category| ChartRow {
            category,
            columns: cars
                .iter()
                .zip(cards)
                .map(|(car, card)| ChartColumn {
                    id: car.id,
                    model: car.model.clone(),
                    score: card.get(category),
                })
                .collect(),
        })
        .collect()
}

/// Everything a chart consumer needs, tagged with the policy that produced it.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub policy_version: u32,
    pub chart: Vec<ChartRow>,
    pub cars: Vec<ScoredCar>,
}

impl ScoreReport {
    pub fn build(cars: &[CarRecord], weights: &ScoringWeights) -> Self {
        let cards = score_cards(cars, weights);
        let chart = pivot(cars, &cards);
        let cars = cars
            .iter()
            .cloned()
            .zip(cards)
            .map(|(car, scores)| ScoredCar { car, scores })
            .collect();
        Self {
            policy_version: POLICY_VERSION,
            chart,
            cars,
        }
    }
}
