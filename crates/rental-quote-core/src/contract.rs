//! Contract fee installments.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::types::{round_money, Money};

/// One-time contract fee charged by the agency.
pub const DEFAULT_CONTRACT_FEE: Money = dec!(2000.00);

pub const MIN_INSTALLMENTS: i32 = 1;
pub const MAX_INSTALLMENTS: i32 = 5;

/// Force a requested installment count into 1..=5.
pub fn clamp_installments(requested: i32) -> u32 {
    let clamped = requested.clamp(MIN_INSTALLMENTS, MAX_INSTALLMENTS);
    if clamped != requested {
        debug!(requested, clamped, "installment count clamped");
    }
    clamped as u32
}

/// Value of one installment when `total_fee` is split `requested` ways.
///
/// Out-of-range counts are clamped rather than rejected.
pub fn installment_value(total_fee: Money, requested: i32) -> Money {
    let n = clamp_installments(requested);
    round_money(total_fee / Decimal::from(n))
}
