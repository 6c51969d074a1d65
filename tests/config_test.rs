use cartable::config::ScoringWeights;
use cartable::error::CarTableError;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    weights: ScoringWeights,
}

fn parse(args: &[&str]) -> (ScoringWeights, clap::ArgMatches) {
    let matches = TestCli::command()
        .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.weights, matches)
}

fn weights_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file
}

#[test]
fn defaults_are_the_published_policy() {
    let w = ScoringWeights::default();
    assert_eq!(w.ncap_points + w.airbag_points + w.safety_feature_points, 10.0);
    assert_eq!(w.airbag_cap, 6.0);
    assert_eq!(w.camera_rear, 5.0);
    assert!(!w.include_kerb_weight);
    assert!(w.validate().is_ok());

    let (cli, _) = parse(&[]);
    assert_eq!(cli, w);
}

#[test]
fn partial_file_fills_defaults() {
    let file = weights_file(r#"{ "airbag_cap": 8.0, "include_kerb_weight": true }"#);
    let w = ScoringWeights::load_from_file(file.path()).unwrap();
    assert_eq!(w.airbag_cap, 8.0);
    assert!(w.include_kerb_weight);
    assert_eq!(w.ncap_points, 3.0);
}

#[test]
fn unbalanced_safety_points_are_rejected() {
    let file = weights_file(r#"{ "ncap_points": 5.0 }"#);
    match ScoringWeights::load_from_file(file.path()) {
        Err(CarTableError::Config(msg)) => assert!(msg.contains("sum to 10")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn missing_file_is_a_config_error() {
    let err = ScoringWeights::load_from_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, CarTableError::Config(_)));
}

#[test]
fn malformed_file_is_a_json_error() {
    let file = weights_file("{ not json");
    let err = ScoringWeights::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, CarTableError::Json(_)));
}

#[test]
fn zero_cap_is_rejected() {
    let w = ScoringWeights {
        airbag_cap: 0.0,
        ..Default::default()
    };
    assert!(w.validate().is_err());
}

#[test]
fn cli_flags_override_only_when_given() {
    let mut from_file = ScoringWeights {
        airbag_cap: 8.0,
        camera_rear: 4.0,
        ..Default::default()
    };

    let (cli, matches) = parse(&["--camera-rear", "6", "--include-kerb-weight"]);
    from_file.merge_from_cli(&cli, &matches);

    assert_eq!(from_file.camera_rear, 6.0);
    assert!(from_file.include_kerb_weight);
    // Defaulted on the CLI side, so the file value stays.
    assert_eq!(from_file.airbag_cap, 8.0);
}
