use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.95 = keep 95%). Never as percentages.
pub type Rate = Decimal;

/// Number of decimal places every currency amount is rounded to.
pub const MONEY_DP: u32 = 2;

/// Round to cents using banker's rounding (half-to-even).
///
/// Every rounding step in the crate goes through here so quotes are
/// reproducible run to run.
pub fn round_money(value: Money) -> Money {
    value.round_dp(MONEY_DP)
}

/// Render an amount with exactly two decimal digits and a `.` separator.
pub fn format_money(value: Money) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(MONEY_DP);
    rounded.to_string()
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
            precision: "rust_decimal_128bit_half_even_2dp".to_string(),
        },
    }
}
