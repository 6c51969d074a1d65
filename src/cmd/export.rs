use cartable::aggregate::score_cards;
use cartable::car::CarRecord;
use cartable::config::ScoringWeights;
use cartable::error::CtResult;
use cartable::export::write_csv;
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub weights: ScoringWeights,

    #[arg(short, long)]
    pub out: String,

    /// Append one column per category score.
    #[arg(long, default_value_t = false)]
    pub with_scores: bool,
}

pub fn run(args: &ExportArgs, cars: &[CarRecord], weights: &ScoringWeights) -> CtResult<()> {
    let cards = args.with_scores.then(|| score_cards(cars, weights));

    let writer = BufWriter::new(File::create(&args.out)?);
    write_csv(writer, cars, cards.as_deref())?;

    info!("💾 Exported {} cars to {}", cars.len(), args.out);
    Ok(())
}
