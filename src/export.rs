use crate::aggregate::ScoreCard;
use crate::car::CarRecord;
use crate::error::{CarTableError, CtResult};
use crate::scorer::Category;
use std::io::Write;
use strum::IntoEnumIterator;

fn yes_no(v: bool) -> String {
    let s = if v { "Yes" } else { "No" };
    s.to_string()
}

/// Spreadsheet headers in export order.
pub const HEADERS: &[&str] = &[
    "Brand",
    "Price",
    "Model",
    "Type",
    "Variant",
    "Engine",
    "Engine Type",
    "Cylinder",
    "Fuel Type",
    "Max Power",
    "Max Torque",
    "Transmission",
    "NCAP",
    "Airbags",
    "ABS",
    "ESP",
    "EBD",
    "Hill Hold",
    "Traction Control",
    "Power Steering",
    "AC",
    "Infotainment",
    "Smart Connectivity",
    "Cruise Control",
    "Engine Start/Stop Button",
    "Sunroof",
    "Camera",
    "Length",
    "Width",
    "Height",
    "Wheelbase",
    "Ground Clearance",
    "Kerb Weight",
    "Boot Space",
    "Fuel Tank",
    "Warranty",
    "Warranty Kilometres",
];

/// One row of cells, aligned with [`HEADERS`].
pub fn row(c: &CarRecord) -> Vec<String> {
    vec![
        c.brand.clone(),
        c.price.clone(),
        c.model.clone(),
        c.body_type.clone(),
        c.variant.clone(),
        c.engine.clone(),
        c.engine_type.clone(),
        c.cylinder.clone(),
        c.fuel_type.clone(),
        c.max_power.clone(),
        c.max_torque.clone(),
        c.transmission.clone(),
        c.ncap.clone(),
        c.air_bags.clone(),
        yes_no(c.abs),
        yes_no(c.esp),
        yes_no(c.ebd),
        yes_no(c.hill_hold),
        yes_no(c.traction_control),
        yes_no(c.power_steering),
        c.ac.clone(),
        yes_no(c.infotainment),
        c.smart_connectivity.clone(),
        yes_no(c.cruise_control),
        yes_no(c.engine_button),
        yes_no(c.sunroof),
        c.camera.clone(),
        c.length.clone(),
        c.width.clone(),
        c.height.clone(),
        c.wheel_base.clone(),
        c.ground_clearance.clone(),
        c.kerb_weight.clone(),
        c.boot.clone(),
        c.fuel_tank.clone(),
        c.warranty.clone(),
        c.warranty_kilometres.clone(),
    ]
}

/// Writes `cars` as CSV with display headers, optionally followed by one column per category.
pub fn write_csv<W: Write>(
    writer: W,
    cars: &[CarRecord],
    scores: Option<&[ScoreCard]>,
) -> CtResult<()> {
    if let Some(cards) = scores {
        if cards.len() != cars.len() {
            return Err(CarTableError::Validation(format!(
                "{} score cards for {} cars",
                cards.len(),
                cars.len()
            )));
        }
    }

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    if scores.is_some() {
        header.extend(Category::iter().map(|c| c.to_string()));
    }
    wtr.write_record(&header)?;

    for (idx, car) in cars.iter().enumerate() {
        let mut cells = row(car);
        if let Some(cards) = scores {
            cells.extend(Category::iter().map(|c| format!("{:.1}", cards[idx].get(c))));
        }
        wtr.write_record(&cells)?;
    }

    wtr.flush()?;
    Ok(())
}
