use clap::Args;
use serde_json::{json, Value};

use golden_visa_core::calculator::{self, parse_custom_price, CostInput};
use golden_visa_core::i18n::format_money;
use golden_visa_core::schedule::{FeeSchedule, ScheduleProfile};
use golden_visa_core::Locale;

use crate::input;

/// Arguments for a cost calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Investment tier: tier-250, tier-400 or tier-800
    #[arg(long, default_value = "tier-250")]
    pub tier: String,

    /// Property price; blank or below the tier minimum uses the minimum
    #[arg(long)]
    pub price: Option<String>,

    /// Adults on the application, main applicant included
    #[arg(long, default_value_t = 1)]
    pub adults: u32,

    /// Children aged 15 or over
    #[arg(long, default_value_t = 0)]
    pub children_15_plus: u32,

    /// Children under 15
    #[arg(long, default_value_t = 0)]
    pub children_under_15: u32,

    /// Add express processing
    #[arg(long)]
    pub express: bool,

    /// Add a power of attorney
    #[arg(long)]
    pub power_of_attorney: bool,

    /// Use premium health insurance cover
    #[arg(long)]
    pub premium_health: bool,

    /// Language for chart labels: en, tr, el
    #[arg(long, default_value = "en")]
    pub locale: Locale,

    /// Built-in fee schedule: standard or flat-dependent
    #[arg(long, default_value = "standard")]
    pub profile: ScheduleProfile,

    /// Path to a JSON or YAML fee schedule (overrides --profile)
    #[arg(long)]
    pub schedule: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = match args.schedule {
        Some(ref path) => FeeSchedule::from_path(path)?,
        None => args.profile.schedule(),
    };

    let cost_input: CostInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CostInput {
            tier_id: args.tier,
            custom_price: args.price.as_deref().and_then(parse_custom_price),
            adults: args.adults,
            children_15_plus: args.children_15_plus,
            children_under_15: args.children_under_15,
            express_processing: args.express,
            power_of_attorney: args.power_of_attorney,
            use_max_health_insurance: args.premium_health,
            locale: args.locale,
        }
    };

    let result = calculator::calculate_costs(&cost_input, &schedule)?;
    let b = &result.result;
    let locale = cost_input.locale;
    let display = json!({
        "purchase_price": format_money(b.purchase_price, locale),
        "property_total": format_money(b.property.total, locale),
        "permit_total": format_money(b.permit.total, locale),
        "additional_total": format_money(b.additional.total, locale),
        "grand_total": format_money(b.grand_total, locale),
    });

    let mut out = serde_json::to_value(&result)?;
    out["display"] = display;
    Ok(out)
}
