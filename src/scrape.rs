//! Boundary with the page-scraping collaborator.
//!
//! Fetching a page and evaluating CSS selectors happens behind [`PageExtractor`];
//! this module owns the selector table, the source URL and the conversion of
//! extracted values into an ordinary [`CarRecord`].

use crate::car::{CarRecord, NOT_RATED};
use crate::error::CtResult;
use crate::loader::assign_ids;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapeRequest {
    pub brand: String,
    pub model: String,
    pub variant: String,
    pub fuel_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result: Vec<CarRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// Cell text, cleaned of line breaks.
    Text,
    /// Tick / cross icon: `icon-check` or `icon-deletearrow` class.
    Icon,
}

#[derive(Debug, Clone, Copy)]
pub struct Selector {
    pub name: &'static str,
    /// Empty when the source page has no stable location for the field.
    pub css: &'static str,
    pub kind: SelectorKind,
}

const fn text(name: &'static str, css: &'static str) -> Selector {
    Selector {
        name,
        css,
        kind: SelectorKind::Text,
    }
}

const fn icon(name: &'static str, css: &'static str) -> Selector {
    Selector {
        name,
        css,
        kind: SelectorKind::Icon,
    }
}

pub const CAMERA_360: &str = "360_camera";

pub const SELECTORS: &[Selector] = &[
    text("price", "#OnRoadPrice > table > tbody > tr:nth-child(1) > td.gsc_col-xs-4"),
    text("type", "#specification > div > table > tbody > tr:nth-child(11) > td.right > span"),
    text("engine", "#scrollDiv > table:nth-child(2) > tbody > tr:nth-child(2) > td:nth-child(2) > span"),
    text("engineType", "#scrollDiv > table:nth-child(2) > tbody > tr:nth-child(1) > td:nth-child(2) > span"),
    text("cylinder", "#scrollDiv > table:nth-child(2) > tbody > tr:nth-child(5) > td:nth-child(2) > span"),
    text("fuelType", "#specification > div > table > tbody > tr:nth-child(2) > td.right > span"),
    text("maxPower", "#scrollDiv > table:nth-child(2) > tbody > tr:nth-child(3) > td:nth-child(2) > span"),
    text("maxTorque", "#scrollDiv > table:nth-child(2) > tbody > tr:nth-child(4) > td:nth-child(2) > span"),
    text("transmission", "#scrollDiv > table:nth-child(2) > tbody > tr:nth-child(8) > td:nth-child(2) > span"),
    text("ncap", ""),
    text("airBags", "#scrollDiv > table:nth-child(23) > tbody > tr:nth-child(5) > td:nth-child(2) > span"),
    text("abs", "#specification > div > table > tbody > tr:nth-child(4) > td.right > span > span"),
    icon("ebd", "#scrollDiv > table:nth-child(23) > tbody > tr:nth-child(12) > td:nth-child(2) > i"),
    icon("esp", "#scrollDiv > table:nth-child(23) > tbody > tr:nth-child(18) > td:nth-child(2) > i"),
    icon("hillHold", "#scrollDiv > table:nth-child(23) > tbody > tr:nth-child(28) > td:nth-child(2) > i"),
    icon("tractionControl", "#scrollDiv > table:nth-child(23) > tbody > tr:nth-child(15) > td:nth-child(2) > i"),
    text("powerSteering", "#specification > div > table > tbody > tr:nth-child(13) > td.right > span > span"),
    text("ac", "#specification > div > table > tbody > tr:nth-child(14) > td.right > span > span"),
    icon("infotainment", "#scrollDiv > table:nth-child(26) > tbody > tr:nth-child(7) > td:nth-child(2) > i"),
    text("smartConnectivity", "#scrollDiv > table:nth-child(26) > tbody > tr:nth-child(9) > td:nth-child(2) > span"),
    icon("cruiseControl", "#scrollDiv > table:nth-child(14) > tbody > tr:nth-child(19) > td:nth-child(2) > i"),
    text("engineButton", "#specification > div > table > tbody > tr:nth-child(5) > td.right > span > span"),
    icon("sunroof", "#scrollDiv > table:nth-child(20) > tbody > tr:nth-child(16) > td:nth-child(2) > i"),
    text("length", "#scrollDiv > table:nth-child(11) > tbody > tr:nth-child(1) > td:nth-child(2) > span"),
    text("width", "#scrollDiv > table:nth-child(11) > tbody > tr:nth-child(2) > td:nth-child(2) > span"),
    text("height", "#scrollDiv > table:nth-child(11) > tbody > tr:nth-child(3) > td:nth-child(2) > span"),
    text("wheelBase", "#scrollDiv > table:nth-child(11) > tbody > tr:nth-child(7) > td:nth-child(2) > span"),
    text("groundClearance", "#scrollDiv > table:nth-child(11) > tbody > tr:nth-child(6) > td:nth-child(2) > span"),
    text("fuelTank", "#scrollDiv > table:nth-child(5) > tbody > tr:nth-child(3) > td:nth-child(2) > span"),
    text("kerbWeight", ""),
    text("boot", "#scrollDiv > table:nth-child(11) > tbody > tr:nth-child(4) > td:nth-child(2) > span"),
    text("warranty", ""),
    text("warrantyKilometres", ""),
    text("camera", "#scrollDiv > table:nth-child(23) > tbody > tr:nth-child(20) > td:nth-child(2) > span"),
    icon(CAMERA_360, "#scrollDiv > table:nth-child(23) > tbody > tr:nth-child(29) > td:nth-child(2) > i"),
];

/// A value pulled out of the page for one selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// `Some(true)` for a tick, `Some(false)` for a cross, `None` when neither is shown.
    Icon(Option<bool>),
    Text(String),
}

/// Fetches the page at `url` and evaluates every selector against it.
pub trait PageExtractor {
    fn extract(&self, url: &str, selectors: &[Selector]) -> CtResult<HashMap<String, RawValue>>;
}

/// `https://www.cardekho.com/overview/{Brand}_{Model}/{Brand}_{Model}_{Variant}[_petrol].htm`
pub fn source_url(req: &ScrapeRequest) -> String {
    let part = |s: &str| s.split_whitespace().collect::<Vec<_>>().join("_");
    let (brand, model, variant) = (part(&req.brand), part(&req.model), part(&req.variant));

    let suffix = if req.fuel_type.trim().eq_ignore_ascii_case("petrol") {
        "_petrol"
    } else {
        ""
    };

    format!(
        "https://www.cardekho.com/overview/{b}_{m}/{b}_{m}_{v}{s}.htm",
        b = brand,
        m = model,
        v = variant,
        s = suffix
    )
}

// Text cells on the overview table that read "Yes"/"No".
const YES_NO_FIELDS: &[&str] = &["abs", "powerSteering", "engineButton"];

fn clean_text(s: &str) -> String {
    s.replace(['\r', '\n'], "").trim().to_string()
}

/// Turns extracted values into a car record.
///
/// Identity fields come from the request; the scraped page supplies the rest.
pub fn normalize(req: &ScrapeRequest, raw: &HashMap<String, RawValue>) -> CtResult<CarRecord> {
    let mut map = Map::new();

    for (name, value) in raw {
        if name == CAMERA_360 {
            continue;
        }
        let json = match value {
            RawValue::Icon(flag) => Value::Bool(flag.unwrap_or(false)),
            RawValue::Text(t) => {
                let t = clean_text(t);
                if YES_NO_FIELDS.contains(&name.as_str()) {
                    Value::Bool(t.eq_ignore_ascii_case("yes"))
                } else {
                    Value::String(t)
                }
            }
        };
        map.insert(name.clone(), json);
    }

    // The overview lists AC as Yes/No without saying whether it is automatic.
    if let Some(Value::String(ac)) = map.get("ac") {
        let ac = if ac.eq_ignore_ascii_case("yes") {
            "Manual".to_string()
        } else if ac.eq_ignore_ascii_case("no") {
            String::new()
        } else {
            ac.clone()
        };
        map.insert("ac".into(), Value::String(ac));
    }

    let has_360 = matches!(raw.get(CAMERA_360), Some(RawValue::Icon(Some(true))));
    let camera = match map.get("camera") {
        Some(Value::String(c)) if c == "With Guidedlines" => "Rear",
        _ if has_360 => "360",
        _ => "NA",
    };
    map.insert("camera".into(), Value::String(camera.to_string()));

    let ncap_missing = match map.get("ncap") {
        Some(Value::String(n)) => n.is_empty(),
        _ => true,
    };
    if ncap_missing {
        map.insert("ncap".into(), Value::String(NOT_RATED.to_string()));
    }

    map.insert("brand".into(), Value::String(req.brand.trim().to_string()));
    map.insert("model".into(), Value::String(req.model.trim().to_string()));
    map.insert("variant".into(), Value::String(req.variant.trim().to_string()));
    let fuel_missing = match map.get("fuelType") {
        Some(Value::String(f)) => f.is_empty(),
        _ => true,
    };
    if fuel_missing {
        map.insert("fuelType".into(), Value::String(req.fuel_type.trim().to_string()));
    }

    Ok(serde_json::from_value(Value::Object(map))?)
}

/// Runs one scrape end to end. Failures are reported in the message, never raised.
pub fn scrape<E: PageExtractor>(extractor: &E, req: &ScrapeRequest) -> ScrapeResponse {
    let url = source_url(req);
    info!("Scraping {}", url);

    let outcome = extractor
        .extract(&url, SELECTORS)
        .and_then(|raw| normalize(req, &raw));

    match outcome {
        Ok(car) => ScrapeResponse {
            message: "Success.".to_string(),
            result: assign_ids(vec![car]),
        },
        Err(e) => {
            warn!("Scrape of {} failed: {}", url, e);
            ScrapeResponse {
                message: "Failed.".to_string(),
                result: Vec::new(),
            }
        }
    }
}
