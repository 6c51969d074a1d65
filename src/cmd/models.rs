use cartable::catalog::Catalog;
use cartable::error::CtResult;
use clap::Args;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct ModelsArgs {
    #[arg(long, default_value = "data/catalog.json")]
    pub catalog: String,

    #[arg(short, long)]
    pub brand: String,

    /// List this model's variants instead of the brand's models.
    #[arg(short, long)]
    pub model: Option<String>,
}

pub fn run(args: &ModelsArgs) -> CtResult<()> {
    let catalog = Catalog::load_from_file(&args.catalog)?;

    let names = match &args.model {
        Some(model) => catalog.lookup_variants(&args.brand, model),
        None => catalog.lookup_models(&args.brand),
    };

    if names.is_empty() {
        warn!("Nothing listed for '{}' in {}", args.brand, args.catalog);
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
