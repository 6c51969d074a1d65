use super::table::FieldSpec;
use crate::car::CarRecord;
use tracing::debug;

/// Largest parsed value of `spec` across the set, never below `0.0`.
pub fn field_max(cars: &[CarRecord], spec: &FieldSpec) -> f64 {
    cars.iter()
        .map(|car| spec.value(car))
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}

/// Ratio-to-max scoring: each field contributes `value / max * weight`.
///
/// Maxima come from the comparison set itself, so the same car scores
/// differently against different rivals. A field whose maximum is zero
/// contributes nothing for every car. Results are unrounded.
pub fn score_ratio(cars: &[CarRecord], specs: &[FieldSpec]) -> Vec<f64> {
    let maxima: Vec<f64> = specs.iter().map(|spec| field_max(cars, spec)).collect();

    for (spec, max) in specs.iter().zip(&maxima) {
        debug!("ratio max {} = {}", spec.field, max);
    }

    cars.iter()
        .map(|car| {
            specs
                .iter()
                .zip(&maxima)
                .map(|(spec, &max)| contribution(spec.value(car), max) * spec.weight)
                .sum()
        })
        .collect()
}

/// `value / max` clamped to `0..=1`; zero when `max` is not positive.
pub fn contribution(value: f64, max: f64) -> f64 {
    if !(max > 0.0) || !value.is_finite() {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::table::CAPACITY;

    #[test]
    fn zero_max_contributes_nothing() {
        assert_eq!(contribution(0.0, 0.0), 0.0);
        assert_eq!(contribution(5.0, 0.0), 0.0);
        assert_eq!(contribution(-1.0, 4.0), 0.0);
    }

    #[test]
    fn capacity_halves() {
        let a = CarRecord {
            boot: "400 litres".into(),
            fuel_tank: "40 litres".into(),
            ..Default::default()
        };
        let b = CarRecord {
            boot: "200 litres".into(),
            fuel_tank: "".into(),
            ..Default::default()
        };
        let scores = score_ratio(&[a, b], CAPACITY);
        assert!((scores[0] - 10.0).abs() < 1e-9);
        assert!((scores[1] - 2.5).abs() < 1e-9);
    }
}
