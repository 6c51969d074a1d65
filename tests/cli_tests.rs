use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    cars_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let cars_path = dir.path().join("cars.json");
        fs::write(
            &cars_path,
            r#"[
                {"brand": "Tata", "model": "Nexon", "fuelType": "Petrol",
                 "engine": "1199 cc", "cylinder": "3", "maxPower": "118 bhp @ 5500 rpm",
                 "maxTorque": "170 Nm @ 1750 rpm", "engineType": "1.2L Turbocharged Revotron",
                 "camera": "360", "sunroof": "Yes"},
                {"brand": "Hyundai", "model": "Venue", "fuelType": "Diesel",
                 "engine": "1197 cc", "cylinder": "4", "maxPower": "82 bhp @ 6000 rpm",
                 "maxTorque": "114 Nm @ 4000 rpm", "engineType": "1.2L Kappa",
                 "camera": "Rear"}
            ]"#,
        )
        .unwrap();
        Self { dir, cars_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_cartable"))
            .current_dir(self.dir.path())
            .args(args)
            .output()
            .expect("Failed to execute binary")
    }

    fn compare(&self, extra: &[&str]) -> Output {
        let mut args = vec!["compare", "--cars", self.cars_path.to_str().unwrap()];
        args.extend_from_slice(extra);
        self.run(&args)
    }
}

fn stdout(output: &Output) -> String {
    let raw = String::from_utf8_lossy(&output.stdout);
    let ansi = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    ansi.replace_all(&raw, "").to_string()
}

/// Scores of the chart row whose first cell is `category`.
fn row_scores(table: &str, category: &str) -> Vec<f64> {
    let pattern = format!(r"^\|\s*{}\s*\|(.*)\|\s*$", regex::escape(category));
    let re = Regex::new(&pattern).unwrap();
    let number = Regex::new(r"\d+\.\d").unwrap();

    let line = table
        .lines()
        .find_map(|l| re.captures(l.trim()))
        .unwrap_or_else(|| panic!("no '{}' row in:\n{}", category, table));
    number
        .find_iter(&line[1])
        .map(|m| m.as_str().parse().unwrap())
        .collect()
}

#[test]
fn compare_prints_the_chart() {
    let ctx = TestContext::new();
    let output = ctx.compare(&[]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert_eq!(row_scores(&out, "Engine & Transmission"), vec![9.5, 8.7]);
    assert_eq!(row_scores(&out, "Features"), vec![10.0, 5.0]);
    assert_eq!(row_scores(&out, "Exterior"), vec![10.0, 0.0]);
}

#[test]
fn compare_cli_weights_override() {
    let ctx = TestContext::new();
    let output = ctx.compare(&["--camera-rear", "7"]);
    assert!(output.status.success());
    assert_eq!(row_scores(&stdout(&output), "Features"), vec![10.0, 7.0]);
}

#[test]
fn compare_filters_by_fuel_type() {
    let ctx = TestContext::new();
    let output = ctx.compare(&["--fuel-type", "diesel", "--format", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cars = report["cars"].as_array().unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["model"], "Venue");
    // Alone in the set, the Venue holds every engine maximum.
    assert_eq!(cars[0]["engineScore"], 10.0);
}

#[test]
fn compare_json_report() {
    let ctx = TestContext::new();
    let output = ctx.compare(&["--format", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["policyVersion"], 2);
    let chart = report["chart"].as_array().unwrap();
    assert_eq!(chart.len(), 7);
    assert_eq!(chart[0]["category"], "Engine & Transmission");
    assert_eq!(chart[0]["Nexon"], 9.5);
}

#[test]
fn compare_cards_table() {
    let ctx = TestContext::new();
    let output = ctx.compare(&["--cards", "--breakdown"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("Overall"));
    assert!(out.contains("Tata Nexon"));
    assert!(out.contains("smartConnectivity (/3)"));
}

#[test]
fn strict_compare_rejects_duplicate_models() {
    let ctx = TestContext::new();
    let dup = ctx.path("dup.json");
    fs::write(&dup, r#"[{"model": "Nexon"}, {"model": "Nexon"}]"#).unwrap();

    let lenient = ctx.run(&["compare", "--cars", dup.to_str().unwrap()]);
    assert!(lenient.status.success());

    let strict = ctx.run(&["compare", "--strict", "--cars", dup.to_str().unwrap()]);
    assert!(!strict.status.success());
}

#[test]
fn json_report_honours_strict() {
    let ctx = TestContext::new();
    let dup = ctx.path("dup.json");
    fs::write(&dup, r#"[{"model": "Nexon"}, {"model": "Nexon", "sunroof": true}]"#).unwrap();
    let dup = dup.to_str().unwrap();

    let lenient = ctx.run(&["compare", "--format", "json", "--cars", dup]);
    assert!(lenient.status.success());
    let report: serde_json::Value = serde_json::from_slice(&lenient.stdout).unwrap();
    let cars = report["cars"].as_array().unwrap();
    assert_eq!(cars.len(), 2);
    assert_eq!(cars[0]["exteriorScore"], 0.0);
    assert_eq!(cars[1]["exteriorScore"], 10.0);
    assert_eq!(report["chart"][3]["Nexon"], 10.0);

    let strict = ctx.run(&["compare", "--format", "json", "--strict", "--cars", dup]);
    assert!(!strict.status.success());
    assert!(strict.stdout.is_empty());
}

#[test]
fn missing_explicit_car_file_fails() {
    let ctx = TestContext::new();
    let output = ctx.run(&["compare", "--cars", "nope.json"]);
    assert!(!output.status.success());
}

#[test]
fn default_car_list_falls_back_to_samples() {
    let ctx = TestContext::new();
    let output = ctx.run(&["compare"]);
    assert!(output.status.success());
    assert_eq!(
        row_scores(&stdout(&output), "Engine & Transmission"),
        vec![9.5, 8.7]
    );
}

#[test]
fn bad_weights_file_fails() {
    let ctx = TestContext::new();
    let weights = ctx.path("weights.json");
    fs::write(&weights, r#"{"airbag_points": 9.0}"#).unwrap();

    let output = ctx.compare(&["--weights", weights.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn export_writes_csv() {
    let ctx = TestContext::new();
    let out = ctx.path("cars.csv");
    let output = ctx.run(&[
        "export",
        "--cars",
        ctx.cars_path.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--with-scores",
    ]);
    assert!(output.status.success());

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("Brand,Price,Model,Type"));
    assert!(header.ends_with("Capacity"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn normalize_replays_captured_values() {
    let ctx = TestContext::new();
    let raw = ctx.path("raw.json");
    fs::write(
        &raw,
        r#"{"maxPower": "118 bhp\n", "abs": "Yes", "ebd": true, "camera": "", "360_camera": true}"#,
    )
    .unwrap();

    let output = ctx.run(&[
        "normalize",
        "--raw",
        raw.to_str().unwrap(),
        "--brand",
        "Tata",
        "--model",
        "Nexon",
        "--variant",
        "XZ Plus",
    ]);
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["message"], "Success.");
    let car = &response["result"][0];
    assert_eq!(car["model"], "Nexon");
    assert_eq!(car["maxPower"], "118 bhp");
    assert_eq!(car["camera"], "360");
    assert_eq!(car["ncap"], "Not Rated");
    assert_eq!(car["abs"], true);
}

#[test]
fn normalize_reports_failure() {
    let ctx = TestContext::new();
    let output = ctx.run(&["normalize", "--raw", "missing.json"]);
    assert!(!output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["message"], "Failed.");
}

#[test]
fn sample_prints_seed_cars() {
    let ctx = TestContext::new();
    let output = ctx.run(&["sample"]);
    assert!(output.status.success());

    let cars: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cars.len(), 2);
    assert_eq!(cars[0]["model"], "Nexon");
}

#[test]
fn models_lists_catalog() {
    let ctx = TestContext::new();
    let catalog = ctx.path("catalog.json");
    fs::write(
        &catalog,
        r#"[{"brand": "Tata", "model": ["Nexon", "Punch"],
             "variant": [{"model": "Punch", "versions": ["Pure", "Creative"]}]}]"#,
    )
    .unwrap();
    let catalog = catalog.to_str().unwrap();

    let models = ctx.run(&["models", "--catalog", catalog, "--brand", "Tata"]);
    assert!(models.status.success());
    assert_eq!(stdout(&models).lines().collect::<Vec<_>>(), vec!["Nexon", "Punch"]);

    let variants = ctx.run(&[
        "models", "--catalog", catalog, "--brand", "Tata", "--model", "Punch",
    ]);
    assert_eq!(
        stdout(&variants).lines().collect::<Vec<_>>(),
        vec!["Pure", "Creative"]
    );
}
