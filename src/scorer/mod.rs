pub mod presence;
pub mod ratio;
pub mod table;
pub mod tiered;

use crate::car::CarRecord;
use crate::config::ScoringWeights;
use strum_macros::{Display, EnumIter, EnumString};

pub use self::table::{FieldSpec, PresenceSpec};

/// Version of the scoring policy implemented by this module. Bump whenever a
/// weight, tier or normalization rule changes so stored charts can be told apart.
pub const POLICY_VERSION: u32 = 2;

/// Upper bound of every category score.
pub const MAX_SCORE: f64 = 10.0;

/// Chart categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
pub enum Category {
    #[strum(to_string = "Engine & Transmission", serialize = "engine")]
    Engine,
    #[strum(to_string = "Safety", serialize = "safety")]
    Safety,
    #[strum(to_string = "Interior, Comfort & Convenience", serialize = "interior")]
    Interior,
    #[strum(to_string = "Exterior", serialize = "exterior")]
    Exterior,
    #[strum(to_string = "Features", serialize = "feature")]
    Features,
    #[strum(to_string = "Dimension & Weight", serialize = "dimensionWeight")]
    DimensionWeight,
    #[strum(to_string = "Capacity", serialize = "capacity")]
    Capacity,
}

impl Category {
    /// Short key, as used in `<key>Score` field names.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::Safety => "safety",
            Self::Interior => "interior",
            Self::Exterior => "exterior",
            Self::Features => "feature",
            Self::DimensionWeight => "dimensionWeight",
            Self::Capacity => "capacity",
        }
    }

    pub fn score_field(&self) -> String {
        format!("{}Score", self.key())
    }

    /// Scores every car of the comparison set for this category.
    ///
    /// The output has the same length and order as `cars`.
    pub fn score<'a>(&self, cars: &'a [CarRecord], weights: &ScoringWeights) -> Vec<Scored<'a>> {
        let raw = match self {
            Self::Engine => ratio::score_ratio(cars, table::ENGINE),
            Self::Safety => tiered::score_safety(cars, weights),
            Self::Interior => presence::score_presence(cars, table::INTERIOR),
            Self::Exterior => presence::score_presence(cars, table::EXTERIOR),
            Self::Features => tiered::score_features(cars, weights),
            Self::DimensionWeight => {
                ratio::score_ratio(cars, table::dimension_fields(weights.include_kerb_weight))
            }
            Self::Capacity => ratio::score_ratio(cars, table::CAPACITY),
        };

        cars.iter()
            .zip(raw)
            .map(|(car, score)| Scored {
                car,
                score: finalize(score),
            })
            .collect()
    }
}

/// A car paired with one category score. Borrowing the record keeps every
/// original field reachable without copying it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored<'a> {
    pub car: &'a CarRecord,
    pub score: f64,
}

/// Final step for every category: clamp to `0..=10`, then round to one decimal
/// place, halves away from zero. `NaN` becomes `0.0`.
pub fn finalize(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let clamped = raw.clamp(0.0, MAX_SCORE);
    (clamped * 10.0).round() / 10.0
}
