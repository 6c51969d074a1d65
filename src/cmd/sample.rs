use cartable::api::ComparisonSession;
use cartable::error::CtResult;
use clap::Args;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    /// Write the seed cars to this file instead of stdout.
    #[arg(short, long)]
    pub out: Option<String>,
}

pub fn run(args: &SampleArgs) -> CtResult<()> {
    let session = ComparisonSession::seeded();
    match &args.out {
        Some(path) => {
            session.save(path)?;
            info!("💾 Wrote {} sample cars to {}", session.cars().len(), path);
        }
        None => println!("{}", serde_json::to_string_pretty(session.cars())?),
    }
    Ok(())
}
