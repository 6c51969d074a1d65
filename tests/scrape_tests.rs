use cartable::car::NOT_RATED;
use cartable::error::{CarTableError, CtResult};
use cartable::scrape::{
    normalize, scrape, source_url, PageExtractor, RawValue, ScrapeRequest, Selector,
    SelectorKind, CAMERA_360, SELECTORS,
};
use std::cell::RefCell;
use std::collections::HashMap;

fn request(fuel: &str) -> ScrapeRequest {
    ScrapeRequest {
        brand: "Tata".into(),
        model: "Nexon".into(),
        variant: "XZ Plus".into(),
        fuel_type: fuel.into(),
    }
}

fn raw(pairs: &[(&str, RawValue)]) -> HashMap<String, RawValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn text(s: &str) -> RawValue {
    RawValue::Text(s.to_string())
}

#[test]
fn petrol_pages_carry_a_suffix() {
    assert_eq!(
        source_url(&request("Petrol")),
        "https://www.cardekho.com/overview/Tata_Nexon/Tata_Nexon_XZ_Plus_petrol.htm"
    );
    assert_eq!(
        source_url(&request("Diesel")),
        "https://www.cardekho.com/overview/Tata_Nexon/Tata_Nexon_XZ_Plus.htm"
    );
}

#[test]
fn selector_table_covers_the_record() {
    let names: Vec<&str> = SELECTORS.iter().map(|s| s.name).collect();
    for field in ["price", "maxPower", "airBags", "camera", "sunroof", "fuelTank"] {
        assert!(names.contains(&field), "missing {}", field);
    }
    let icon = SELECTORS.iter().find(|s| s.name == CAMERA_360).unwrap();
    assert_eq!(icon.kind, SelectorKind::Icon);
    let ncap = SELECTORS.iter().find(|s| s.name == "ncap").unwrap();
    assert!(ncap.css.is_empty());
}

#[test]
fn normalizes_scraped_values() {
    let values = raw(&[
        ("price", text("\n  Rs. 11.00 Lakh\n")),
        ("maxPower", text("118bhp@5500rpm\r\n")),
        ("abs", text("Yes")),
        ("powerSteering", text("No")),
        ("ac", text("Yes")),
        ("ebd", RawValue::Icon(Some(true))),
        ("esp", RawValue::Icon(Some(false))),
        ("hillHold", RawValue::Icon(None)),
        ("ncap", text("")),
        ("camera", text("With Guidedlines")),
        (CAMERA_360, RawValue::Icon(Some(true))),
    ]);
    let car = normalize(&request("Petrol"), &values).unwrap();

    assert_eq!(car.price, "Rs. 11.00 Lakh");
    assert_eq!(car.max_power, "118bhp@5500rpm");
    assert!(car.abs);
    assert!(!car.power_steering);
    assert_eq!(car.ac, "Manual");
    assert!(car.ebd);
    assert!(!car.esp);
    assert!(!car.hill_hold);
    assert_eq!(car.ncap, NOT_RATED);
    assert_eq!(car.camera, "Rear");
    assert_eq!(car.model, "Nexon");
    assert_eq!(car.variant, "XZ Plus");
    assert_eq!(car.fuel_type, "Petrol");
}

#[test]
fn camera_falls_back_to_icon_then_na() {
    let surround = raw(&[("camera", text("Yes")), (CAMERA_360, RawValue::Icon(Some(true)))]);
    assert_eq!(normalize(&request(""), &surround).unwrap().camera, "360");

    let none = raw(&[("camera", text("")), (CAMERA_360, RawValue::Icon(None))]);
    assert_eq!(normalize(&request(""), &none).unwrap().camera, "NA");
}

#[test]
fn scraped_fuel_type_wins_over_request() {
    let values = raw(&[("fuelType", text("Diesel"))]);
    let car = normalize(&request("Petrol"), &values).unwrap();
    assert_eq!(car.fuel_type, "Diesel");
}

#[test]
fn raw_values_decode_from_json() {
    let values: HashMap<String, RawValue> =
        serde_json::from_str(r#"{"ebd": true, "esp": null, "price": "10 Lakh"}"#).unwrap();
    assert_eq!(values["ebd"], RawValue::Icon(Some(true)));
    assert_eq!(values["esp"], RawValue::Icon(None));
    assert_eq!(values["price"], text("10 Lakh"));
}

struct FakePage {
    values: Option<HashMap<String, RawValue>>,
    seen: RefCell<Vec<String>>,
}

impl PageExtractor for FakePage {
    fn extract(&self, url: &str, selectors: &[Selector]) -> CtResult<HashMap<String, RawValue>> {
        assert_eq!(selectors.len(), SELECTORS.len());
        self.seen.borrow_mut().push(url.to_string());
        self.values
            .clone()
            .ok_or_else(|| CarTableError::Validation("page not found".into()))
    }
}

#[test]
fn scrape_wraps_one_record() {
    let page = FakePage {
        values: Some(raw(&[("maxPower", text("118 bhp"))])),
        seen: RefCell::new(Vec::new()),
    };
    let response = scrape(&page, &request("Petrol"));

    assert_eq!(response.message, "Success.");
    assert_eq!(response.result.len(), 1);
    assert!(response.result[0].id.is_some());
    assert_eq!(page.seen.borrow()[0], source_url(&request("Petrol")));
}

#[test]
fn scrape_failure_is_reported_not_raised() {
    let page = FakePage {
        values: None,
        seen: RefCell::new(Vec::new()),
    };
    let response = scrape(&page, &request("Petrol"));
    assert_eq!(response.message, "Failed.");
    assert!(response.result.is_empty());

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("result").is_none());
}
