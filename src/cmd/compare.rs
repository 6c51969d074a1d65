use crate::reports;
use cartable::aggregate::{self, ScoreReport};
use cartable::car::CarRecord;
use cartable::config::ScoringWeights;
use cartable::error::CtResult;
use cartable::loader::filter_cars;
use cartable::scorer::POLICY_VERSION;
use clap::{Args, ValueEnum};
use tracing::{info, warn};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub weights: ScoringWeights,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub fuel_type: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Fail instead of warning when two cars share a model name.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Also print one score card per car.
    #[arg(long, default_value_t = false)]
    pub cards: bool,

    /// Also print the interior points each car earned.
    #[arg(long, default_value_t = false)]
    pub breakdown: bool,
}

pub fn run(args: &CompareArgs, cars: Vec<CarRecord>, weights: &ScoringWeights) -> CtResult<()> {
    let cars = filter_cars(cars, args.brand.as_deref(), args.fuel_type.as_deref());
    if cars.is_empty() {
        warn!("No cars left to compare after filtering.");
    }
    info!("📊 Comparing {} cars (policy v{})", cars.len(), POLICY_VERSION);

    aggregate::check_duplicate_models(&cars, args.strict)?;

    match args.format {
        OutputFormat::Json => {
            let report = ScoreReport::build(&cars, weights);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            let cards = aggregate::score_cards(&cars, weights);
            reports::print_chart(&aggregate::pivot(&cars, &cards));
            if args.cards {
                reports::print_score_cards(&cars, &cards);
            }
            if args.breakdown {
                reports::print_interior_breakdown(&cars);
            }
        }
    }
    Ok(())
}
