use cartable::error::{CarTableError, CtResult};
use cartable::scrape::{self, PageExtractor, RawValue, ScrapeRequest, Selector};
use clap::Args;
use std::collections::HashMap;
use std::fs;
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// JSON object of selector name to extracted text, `true`/`false` or `null`.
    #[arg(long)]
    pub raw: String,

    #[arg(long, default_value = "")]
    pub brand: String,

    #[arg(long, default_value = "")]
    pub model: String,

    #[arg(long, default_value = "")]
    pub variant: String,

    #[arg(long, default_value = "")]
    pub fuel_type: String,
}

/// Replays values captured from a page instead of fetching it.
struct CapturedPage<'a> {
    path: &'a str,
}

impl PageExtractor for CapturedPage<'_> {
    fn extract(&self, url: &str, _selectors: &[Selector]) -> CtResult<HashMap<String, RawValue>> {
        debug!("Replaying {} for {}", self.path, url);
        let content = fs::read_to_string(self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

pub fn run(args: &NormalizeArgs) -> CtResult<()> {
    let request = ScrapeRequest {
        brand: args.brand.clone(),
        model: args.model.clone(),
        variant: args.variant.clone(),
        fuel_type: args.fuel_type.clone(),
    };

    let response = scrape::scrape(&CapturedPage { path: &args.raw }, &request);
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.result.is_empty() {
        return Err(CarTableError::Validation(format!(
            "could not normalize '{}'",
            args.raw
        )));
    }
    Ok(())
}
