use cartable::car::{sample_cars, CarRecord};
use cartable::config::ScoringWeights;
use cartable::error::CtResult;
use cartable::loader::load_cars_from_file;
use clap::{parser::ValueSource, ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::Path;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/cars/sample.json")]
    cars: String,

    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Compare(cmd::compare::CompareArgs),
    Export(cmd::export::ExportArgs),
    Normalize(cmd::normalize::NormalizeArgs),
    Sample(cmd::sample::SampleArgs),
    Models(cmd::models::ModelsArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, matches: &ArgMatches) -> CtResult<()> {
    match &cli.command {
        Commands::Compare(args) => {
            let sub = subcommand_matches(matches, "compare");
            let weights = resolve_weights(cli.weights.as_deref(), &args.weights, sub)?;
            let cars = load_cars(cli, sub)?;
            cmd::compare::run(args, cars, &weights)
        }
        Commands::Export(args) => {
            let sub = subcommand_matches(matches, "export");
            let weights = resolve_weights(cli.weights.as_deref(), &args.weights, sub)?;
            let cars = load_cars(cli, sub)?;
            cmd::export::run(args, &cars, &weights)
        }
        Commands::Normalize(args) => cmd::normalize::run(args),
        Commands::Sample(args) => cmd::sample::run(args),
        Commands::Models(args) => cmd::models::run(args),
    }
}

fn subcommand_matches<'a>(matches: &'a ArgMatches, name: &str) -> &'a ArgMatches {
    matches.subcommand_matches(name).unwrap_or(matches)
}

/// Weights file as the base, explicit CLI flags on top.
fn resolve_weights(
    path: Option<&str>,
    cli_weights: &ScoringWeights,
    sub_matches: &ArgMatches,
) -> CtResult<ScoringWeights> {
    let weights = match path {
        Some(path) => {
            info!("⚖️  Loading Weights from: {}", path);
            let mut file_weights = ScoringWeights::load_from_file(path)?;
            file_weights.merge_from_cli(cli_weights, sub_matches);
            file_weights
        }
        None => cli_weights.clone(),
    };
    weights.validate()?;
    Ok(weights)
}

/// A missing default car list falls back to the sample cars; an explicit path must exist.
fn load_cars(cli: &Cli, sub_matches: &ArgMatches) -> CtResult<Vec<CarRecord>> {
    let explicit = sub_matches.value_source("cars") == Some(ValueSource::CommandLine);
    if !explicit && !Path::new(&cli.cars).exists() {
        warn!("⚠️  '{}' not found. Using the sample cars.", cli.cars);
        return Ok(sample_cars());
    }
    load_cars_from_file(&cli.cars)
}
