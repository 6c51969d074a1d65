//! Declarative field tables. Each category lists the fields it reads and the
//! points each one is worth out of 10; the generic scorers in `ratio` and
//! `presence` consume them.

use crate::car::{AcKind, CarField, CarFlag, CarRecord, SmartConnectivity};
use crate::parser::extract_magnitude;

/// One numeric field normalized ratio-to-max across the comparison set.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub field: CarField,
    /// Points awarded to the car holding the maximum of this field.
    pub weight: f64,
    pub parser: fn(&str) -> f64,
}

impl FieldSpec {
    pub const fn new(field: CarField, weight: f64) -> Self {
        Self {
            field,
            weight,
            parser: extract_magnitude,
        }
    }

    pub fn value(&self, car: &CarRecord) -> f64 {
        (self.parser)(self.field.text(car))
    }
}

/// One feature worth up to `max_points`, independent of the other cars.
#[derive(Clone, Copy)]
pub struct PresenceSpec {
    pub name: &'static str,
    pub max_points: f64,
    pub points: fn(&CarRecord) -> f64,
}

pub const ENGINE: &[FieldSpec] = &[
    FieldSpec::new(CarField::Engine, 2.0),
    FieldSpec::new(CarField::Cylinder, 2.0),
    FieldSpec::new(CarField::MaxPower, 2.0),
    FieldSpec::new(CarField::MaxTorque, 2.0),
    FieldSpec::new(CarField::EngineType, 2.0),
];

pub const DIMENSION: &[FieldSpec] = &[
    FieldSpec::new(CarField::Length, 2.0),
    FieldSpec::new(CarField::Width, 2.0),
    FieldSpec::new(CarField::Height, 2.0),
    FieldSpec::new(CarField::WheelBase, 2.0),
    FieldSpec::new(CarField::GroundClearance, 2.0),
];

const SIXTH: f64 = 10.0 / 6.0;

pub const DIMENSION_WITH_KERB: &[FieldSpec] = &[
    FieldSpec::new(CarField::Length, SIXTH),
    FieldSpec::new(CarField::Width, SIXTH),
    FieldSpec::new(CarField::Height, SIXTH),
    FieldSpec::new(CarField::WheelBase, SIXTH),
    FieldSpec::new(CarField::GroundClearance, SIXTH),
    FieldSpec::new(CarField::KerbWeight, SIXTH),
];

pub fn dimension_fields(include_kerb_weight: bool) -> &'static [FieldSpec] {
    if include_kerb_weight {
        DIMENSION_WITH_KERB
    } else {
        DIMENSION
    }
}

pub const CAPACITY: &[FieldSpec] = &[
    FieldSpec::new(CarField::Boot, 5.0),
    FieldSpec::new(CarField::FuelTank, 5.0),
];

// Interior: 6 features plus 3 bonus slots (automatic AC, one or both phone projections).
pub const INTERIOR: &[PresenceSpec] = &[
    PresenceSpec {
        name: "ac",
        max_points: 2.0,
        points: ac_points,
    },
    PresenceSpec {
        name: "powerSteering",
        max_points: 1.0,
        points: power_steering_point,
    },
    PresenceSpec {
        name: "infotainment",
        max_points: 1.0,
        points: infotainment_point,
    },
    PresenceSpec {
        name: "smartConnectivity",
        max_points: 3.0,
        points: smart_connectivity_points,
    },
    PresenceSpec {
        name: "cruiseControl",
        max_points: 1.0,
        points: cruise_control_point,
    },
    PresenceSpec {
        name: "engineButton",
        max_points: 1.0,
        points: engine_button_point,
    },
];

pub const EXTERIOR: &[PresenceSpec] = &[PresenceSpec {
    name: "sunroof",
    max_points: 1.0,
    points: sunroof_point,
}];

/// Flags counted by the safety score's feature share.
pub const SAFETY_FLAGS: &[CarFlag] = &[
    CarFlag::Abs,
    CarFlag::Esp,
    CarFlag::Ebd,
    CarFlag::HillHold,
    CarFlag::TractionControl,
];

/// Number of tiered feature items; an unrecognised camera type earns `full / FEATURE_ITEMS`.
pub const FEATURE_ITEMS: usize = 1;

fn flag_point(car: &CarRecord, flag: CarFlag) -> f64 {
    if flag.is_set(car) {
        1.0
    } else {
        0.0
    }
}

fn power_steering_point(car: &CarRecord) -> f64 {
    flag_point(car, CarFlag::PowerSteering)
}

fn infotainment_point(car: &CarRecord) -> f64 {
    flag_point(car, CarFlag::Infotainment)
}

fn cruise_control_point(car: &CarRecord) -> f64 {
    flag_point(car, CarFlag::CruiseControl)
}

fn engine_button_point(car: &CarRecord) -> f64 {
    flag_point(car, CarFlag::EngineButton)
}

fn sunroof_point(car: &CarRecord) -> f64 {
    flag_point(car, CarFlag::Sunroof)
}

// Any fitted AC counts once, automatic climate control earns the bonus slot.
fn ac_points(car: &CarRecord) -> f64 {
    match car.ac_kind() {
        Some(AcKind::Automatic) => 2.0,
        Some(AcKind::Manual) => 1.0,
        None => 0.0,
    }
}

fn smart_connectivity_points(car: &CarRecord) -> f64 {
    match car.smart_connectivity_kind() {
        Some(SmartConnectivity::Both) => 3.0,
        Some(SmartConnectivity::AndroidAuto | SmartConnectivity::AppleCarPlay) => 2.0,
        None => 0.0,
    }
}
