use crate::error::{CarTableError, CtResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable constants of the scoring policy.
///
/// The defaults are the authoritative policy; changing them changes every chart.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // === SAFETY (3 + 4 + 3 = 10) ===
    #[arg(long, default_value_t = 3.0)]
    pub ncap_points: f64,
    #[arg(long, default_value_t = 5.0)]
    pub ncap_max_rating: f64,
    #[arg(long, default_value_t = 4.0)]
    pub airbag_points: f64,
    /// Airbag count worth full points; raised to the largest count in the comparison.
    #[arg(long, default_value_t = 6.0)]
    pub airbag_cap: f64,
    #[arg(long, default_value_t = 3.0)]
    pub safety_feature_points: f64,

    // === FEATURES ===
    #[arg(long, default_value_t = 10.0)]
    pub camera_full: f64,
    #[arg(long, default_value_t = 5.0)]
    pub camera_rear: f64,

    // === DIMENSION & WEIGHT ===
    #[arg(long, default_value_t = false)]
    pub include_kerb_weight: bool,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            ncap_points: 3.0,
            ncap_max_rating: 5.0,
            airbag_points: 4.0,
            airbag_cap: 6.0,
            safety_feature_points: 3.0,
            camera_full: 10.0,
            camera_rear: 5.0,
            include_kerb_weight: false,
        }
    }
}

impl ScoringWeights {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CtResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CarTableError::Config(format!("Failed to read weights file '{}': {}", path.display(), e))
        })?;
        let weights: Self = serde_json::from_str(&content)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Rejects weights that could push a category outside 0..=10 or divide by zero.
    pub fn validate(&self) -> CtResult<()> {
        let safety_total = self.ncap_points + self.airbag_points + self.safety_feature_points;
        if (safety_total - 10.0).abs() > 1e-9 {
            return Err(CarTableError::Config(format!(
                "safety points must sum to 10, got {}",
                safety_total
            )));
        }

        let positive = [
            ("ncap_max_rating", self.ncap_max_rating),
            ("airbag_cap", self.airbag_cap),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(CarTableError::Config(format!("{} must be > 0", name)));
            }
        }

        let bounded = [
            ("ncap_points", self.ncap_points),
            ("airbag_points", self.airbag_points),
            ("safety_feature_points", self.safety_feature_points),
            ("camera_full", self.camera_full),
            ("camera_rear", self.camera_rear),
        ];
        for (name, value) in bounded {
            if !(0.0..=10.0).contains(&value) {
                return Err(CarTableError::Config(format!(
                    "{} must lie in 0..=10, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    pub fn merge_from_cli(&mut self, cli_weights: &ScoringWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field.clone();
                }
            };
        }

        update_if_present!(ncap_points, "ncap_points");
        update_if_present!(ncap_max_rating, "ncap_max_rating");
        update_if_present!(airbag_points, "airbag_points");
        update_if_present!(airbag_cap, "airbag_cap");
        update_if_present!(safety_feature_points, "safety_feature_points");

        update_if_present!(camera_full, "camera_full");
        update_if_present!(camera_rear, "camera_rear");

        update_if_present!(include_kerb_weight, "include_kerb_weight");
    }
}
