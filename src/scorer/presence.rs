use super::table::PresenceSpec;
use super::MAX_SCORE;
use crate::car::CarRecord;

/// Feature-presence scoring: the car's points over the table's total points, scaled to 10.
///
/// Independent of the rest of the comparison set.
pub fn score_presence(cars: &[CarRecord], specs: &[PresenceSpec]) -> Vec<f64> {
    let total: f64 = specs.iter().map(|s| s.max_points).sum();

    cars.iter()
        .map(|car| {
            if total <= 0.0 {
                return 0.0;
            }
            let earned: f64 = specs
                .iter()
                .map(|s| (s.points)(car).clamp(0.0, s.max_points))
                .sum();
            earned / total * MAX_SCORE
        })
        .collect()
}

/// Per-feature breakdown for one car, for reports.
pub fn breakdown(car: &CarRecord, specs: &[PresenceSpec]) -> Vec<(&'static str, f64, f64)> {
    specs
        .iter()
        .map(|s| (s.name, (s.points)(car), s.max_points))
        .collect()
}
