use clap::Args;
use serde_json::Value;

use golden_visa_core::tiers;
use golden_visa_core::Locale;

/// Arguments for listing tiers
#[derive(Args)]
pub struct TiersArgs {
    /// Language for tier names: en, tr, el
    #[arg(long, default_value = "en")]
    pub locale: Locale,
}

pub fn run_tiers(args: TiersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(tiers::localized_tiers(args.locale))?)
}
