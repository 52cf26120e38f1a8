use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in euro. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.24 = 24%). Never as percentages.
pub type Rate = Decimal;

/// Every amount the engine produces is denominated in this currency.
pub const CURRENCY: &str = "EUR";

/// Round a money amount to whole cents, half-cents away from zero.
pub fn round_cents(value: Money) -> Money {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Sum money amounts, saturating at `Decimal::MAX` instead of overflowing.
pub fn saturating_sum(parts: impl IntoIterator<Item = Money>) -> Money {
    parts
        .into_iter()
        .fold(Decimal::ZERO, |acc, part| acc.saturating_add(part))
}

/// Ratio of `part` to `whole`, zero when `whole` is not positive.
pub fn share_of(part: Money, whole: Money) -> Rate {
    if whole > Decimal::ZERO {
        part / whole
    } else {
        Decimal::ZERO
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
    pub currency: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
            currency: CURRENCY.to_string(),
        },
    }
}
