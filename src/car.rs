use crate::parser::extract_magnitude;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Stable identity of a record inside a comparison, independent of its display fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(pub u64);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One car as entered by a user or synthesized from a scraped page.
///
/// Numeric specifications stay as text (`"118 bhp @ 5500 rpm"`); the scorers read
/// magnitudes through [`crate::parser::extract_magnitude`]. Deserialization is lenient:
/// numbers are accepted for text fields and `"Yes"`/`"No"`/empty strings for flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CarId>,

    // Display
    #[serde(deserialize_with = "de_text")]
    pub brand: String,
    #[serde(deserialize_with = "de_text")]
    pub price: String,
    #[serde(deserialize_with = "de_text")]
    pub model: String,
    #[serde(deserialize_with = "de_text")]
    pub variant: String,
    #[serde(rename = "type", deserialize_with = "de_text")]
    pub body_type: String,

    // Engine & Transmission
    #[serde(deserialize_with = "de_text")]
    pub engine: String,
    #[serde(deserialize_with = "de_text")]
    pub engine_type: String,
    #[serde(deserialize_with = "de_text")]
    pub cylinder: String,
    #[serde(deserialize_with = "de_text")]
    pub fuel_type: String,
    #[serde(deserialize_with = "de_text")]
    pub max_power: String,
    #[serde(deserialize_with = "de_text")]
    pub max_torque: String,
    #[serde(deserialize_with = "de_text")]
    pub transmission: String,

    // Safety
    #[serde(deserialize_with = "de_text")]
    pub ncap: String,
    #[serde(deserialize_with = "de_text")]
    pub air_bags: String,
    #[serde(deserialize_with = "de_flag")]
    pub abs: bool,
    #[serde(deserialize_with = "de_flag")]
    pub ebd: bool,
    #[serde(deserialize_with = "de_flag")]
    pub esp: bool,
    #[serde(deserialize_with = "de_flag")]
    pub hill_hold: bool,
    #[serde(deserialize_with = "de_flag")]
    pub traction_control: bool,

    // Interior, Comfort & Convenience
    #[serde(deserialize_with = "de_flag")]
    pub power_steering: bool,
    #[serde(deserialize_with = "de_text")]
    pub ac: String,
    #[serde(deserialize_with = "de_flag")]
    pub infotainment: bool,
    #[serde(deserialize_with = "de_text")]
    pub smart_connectivity: String,
    #[serde(deserialize_with = "de_text")]
    pub speakers: String,
    #[serde(deserialize_with = "de_flag")]
    pub cruise_control: bool,
    #[serde(deserialize_with = "de_flag")]
    pub engine_button: bool,

    // Exterior
    #[serde(deserialize_with = "de_flag")]
    pub sunroof: bool,

    // Features
    #[serde(deserialize_with = "de_text")]
    pub camera: String,

    // Dimension & Weight
    #[serde(deserialize_with = "de_text")]
    pub length: String,
    #[serde(deserialize_with = "de_text")]
    pub width: String,
    #[serde(deserialize_with = "de_text")]
    pub height: String,
    #[serde(deserialize_with = "de_text")]
    pub wheel_base: String,
    #[serde(deserialize_with = "de_text")]
    pub ground_clearance: String,
    #[serde(deserialize_with = "de_text")]
    pub kerb_weight: String,

    // Capacity
    #[serde(deserialize_with = "de_text")]
    pub boot: String,
    #[serde(deserialize_with = "de_text")]
    pub fuel_tank: String,

    // Ownership
    #[serde(deserialize_with = "de_text")]
    pub warranty: String,
    #[serde(deserialize_with = "de_text")]
    pub warranty_kilometres: String,
}

impl CarRecord {
    /// The empty row a user starts from when adding a car by hand.
    pub fn blank() -> Self {
        Self {
            ncap: NOT_RATED.to_string(),
            camera: "NA".to_string(),
            ..Default::default()
        }
    }

    pub fn ac_kind(&self) -> Option<AcKind> {
        parse_choice(&self.ac)
    }

    pub fn smart_connectivity_kind(&self) -> Option<SmartConnectivity> {
        parse_choice(&self.smart_connectivity)
    }

    /// `None` for `"NA"` and empty values.
    pub fn camera_kind(&self) -> Option<Camera> {
        match parse_choice::<Camera>(&self.camera)? {
            Camera::NotAvailable => None,
            other => Some(other),
        }
    }

    /// NCAP star rating, `None` when the car is unrated.
    pub fn ncap_rating(&self) -> Option<f64> {
        let raw = CarField::Ncap.text(self).trim();
        if raw.is_empty()
            || raw.eq_ignore_ascii_case(NOT_RATED)
            || raw.eq_ignore_ascii_case("NA")
        {
            return None;
        }
        Some(extract_magnitude(raw))
    }

    /// `"Tata Nexon XZ Plus"`, skipping empty parts.
    pub fn display_name(&self) -> String {
        [&self.brand, &self.model, &self.variant]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub const NOT_RATED: &str = "Not Rated";

fn parse_choice<T: std::str::FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum AcKind {
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum SmartConnectivity {
    #[strum(serialize = "Android Auto")]
    AndroidAuto,
    #[strum(serialize = "Apple Car Play", serialize = "Apple CarPlay")]
    AppleCarPlay,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Camera {
    #[strum(serialize = "360")]
    Surround,
    Rear,
    #[strum(serialize = "NA")]
    NotAvailable,
    #[strum(default)]
    Other(String),
}

/// Text fields that feed the numeric scorers, safety included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum CarField {
    Engine,
    Cylinder,
    MaxPower,
    MaxTorque,
    EngineType,
    Ncap,
    AirBags,
    Length,
    Width,
    Height,
    WheelBase,
    GroundClearance,
    KerbWeight,
    Boot,
    FuelTank,
}

impl CarField {
    pub fn text<'a>(&self, car: &'a CarRecord) -> &'a str {
        match self {
            Self::Engine => &car.engine,
            Self::Cylinder => &car.cylinder,
            Self::MaxPower => &car.max_power,
            Self::MaxTorque => &car.max_torque,
            Self::EngineType => &car.engine_type,
            Self::Ncap => &car.ncap,
            Self::AirBags => &car.air_bags,
            Self::Length => &car.length,
            Self::Width => &car.width,
            Self::Height => &car.height,
            Self::WheelBase => &car.wheel_base,
            Self::GroundClearance => &car.ground_clearance,
            Self::KerbWeight => &car.kerb_weight,
            Self::Boot => &car.boot,
            Self::FuelTank => &car.fuel_tank,
        }
    }
}

/// Boolean features read by the presence-based scorers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "camelCase")]
pub enum CarFlag {
    Abs,
    Esp,
    Ebd,
    HillHold,
    TractionControl,
    PowerSteering,
    Infotainment,
    CruiseControl,
    EngineButton,
    Sunroof,
}

impl CarFlag {
    pub fn is_set(&self, car: &CarRecord) -> bool {
        match self {
            Self::Abs => car.abs,
            Self::Esp => car.esp,
            Self::Ebd => car.ebd,
            Self::HillHold => car.hill_hold,
            Self::TractionControl => car.traction_control,
            Self::PowerSteering => car.power_steering,
            Self::Infotainment => car.infotainment,
            Self::CruiseControl => car.cruise_control,
            Self::EngineButton => car.engine_button,
            Self::Sunroof => car.sunroof,
        }
    }
}

/// The two records a fresh comparison is seeded with.
pub fn sample_cars() -> Vec<CarRecord> {
    vec![
        CarRecord {
            id: Some(CarId(1)),
            brand: "Tata".into(),
            price: "11,00,000".into(),
            model: "Nexon".into(),
            variant: "XZ Plus".into(),
            body_type: "SUV".into(),
            engine: "1199 cc".into(),
            engine_type: "1.2L Turbocharged Revotron".into(),
            cylinder: "3".into(),
            fuel_type: "Petrol".into(),
            max_power: "118 bhp @ 5500 rpm".into(),
            max_torque: "170 Nm @ 1750 rpm".into(),
            transmission: "Manual".into(),
            ncap: "5".into(),
            air_bags: "2".into(),
            abs: true,
            ebd: true,
            esp: true,
            hill_hold: true,
            traction_control: true,
            power_steering: true,
            ac: "Automatic".into(),
            infotainment: true,
            smart_connectivity: "Both".into(),
            speakers: "8".into(),
            cruise_control: false,
            engine_button: true,
            sunroof: false,
            camera: "NA".into(),
            length: "3993 mm".into(),
            width: "1811 mm".into(),
            height: String::new(),
            wheel_base: String::new(),
            ground_clearance: String::new(),
            kerb_weight: "1250 kg".into(),
            boot: "350 litres".into(),
            fuel_tank: "44 litres".into(),
            warranty: "3".into(),
            warranty_kilometres: "100000".into(),
        },
        CarRecord {
            id: Some(CarId(2)),
            brand: "Hyundai".into(),
            price: "976000".into(),
            model: "Venue".into(),
            variant: "S (O)".into(),
            body_type: "SUV".into(),
            engine: "1197 cc".into(),
            engine_type: "1.2L Kappa".into(),
            cylinder: "4".into(),
            fuel_type: "Petrol".into(),
            max_power: "82 bhp @ 6000 rpm".into(),
            max_torque: "114 Nm @ 4000 rpm".into(),
            transmission: "Manual".into(),
            ncap: "NA".into(),
            air_bags: "4".into(),
            abs: true,
            ebd: true,
            esp: true,
            hill_hold: true,
            traction_control: true,
            power_steering: true,
            ac: "Manual".into(),
            infotainment: true,
            smart_connectivity: "Android Auto".into(),
            speakers: String::new(),
            cruise_control: false,
            engine_button: false,
            sunroof: false,
            camera: "Rear".into(),
            length: "3995 mm".into(),
            width: "1770 mm".into(),
            height: "1617 mm".into(),
            wheel_base: "2500 mm".into(),
            ground_clearance: "195 mm".into(),
            kerb_weight: "1233 kg".into(),
            boot: "350 litres".into(),
            fuel_tank: "45 litres".into(),
            warranty: "3".into(),
            warranty_kilometres: "Unlimited".into(),
        },
    ]
}

// --- Lenient field decoding ---

fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<String, D2::Error> {
            d.deserialize_any(TextVisitor)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean, \"Yes\"/\"No\", a number or null")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            Ok(matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "yes" | "y" | "true" | "1"
            ))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            Ok(v != 0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<bool, D2::Error> {
            d.deserialize_any(FlagVisitor)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}
