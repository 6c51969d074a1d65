//! Scorers that do not fit the generic tables: safety mixes a star rating, a
//! set-relative airbag ratio and a feature share; features award fixed tiers.

use super::ratio::contribution;
use super::table::{FEATURE_ITEMS, SAFETY_FLAGS};
use crate::car::{Camera, CarField, CarRecord};
use crate::config::ScoringWeights;
use crate::parser::extract_magnitude;
use tracing::debug;

pub fn score_safety(cars: &[CarRecord], w: &ScoringWeights) -> Vec<f64> {
    // Airbag denominator: the fixed cap, raised when a rival carries more.
    let observed = cars
        .iter()
        .map(|car| extract_magnitude(CarField::AirBags.text(car)))
        .fold(0.0, f64::max);
    let airbag_max = w.airbag_cap.max(observed);
    debug!("safety airbag denominator = {}", airbag_max);

    cars.iter()
        .map(|car| {
            let ncap = car
                .ncap_rating()
                .map(|rating| contribution(rating, w.ncap_max_rating) * w.ncap_points)
                .unwrap_or(0.0);

            let airbags = contribution(extract_magnitude(CarField::AirBags.text(car)), airbag_max)
                * w.airbag_points;

            let present = SAFETY_FLAGS.iter().filter(|f| f.is_set(car)).count();
            let features =
                present as f64 / SAFETY_FLAGS.len() as f64 * w.safety_feature_points;

            ncap + airbags + features
        })
        .collect()
}

pub fn score_features(cars: &[CarRecord], w: &ScoringWeights) -> Vec<f64> {
    cars.iter()
        .map(|car| match car.camera_kind() {
            Some(Camera::Surround) => w.camera_full,
            Some(Camera::Rear) => w.camera_rear,
            Some(Camera::Other(_)) => w.camera_full / FEATURE_ITEMS as f64,
            Some(Camera::NotAvailable) | None => 0.0,
        })
        .collect()
}
