//! Full rental quote: rent, contract installments and the 12-month budget.

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::contract::{clamp_installments, installment_value, MAX_INSTALLMENTS, MIN_INSTALLMENTS};
use crate::error::RentalQuoteError;
use crate::pricing::{rent_breakdown, PropertyType, RateCard, RentAdjustment, RentalConfiguration};
use crate::schedule::{generate_schedule, schedule_total, ScheduleRow};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::RentalQuoteResult;

/// Everything the agency hands back to a prospective tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub property_type: PropertyType,
    pub base_rent: Money,
    pub adjustments: Vec<RentAdjustment>,
    pub discount: Money,
    pub monthly_rent: Money,
    pub contract_fee: Money,
    /// Installments actually applied, after clamping
    pub installments: u32,
    pub installment_value: Money,
    pub first_year_total: Money,
    pub schedule: Vec<ScheduleRow>,
}

#[derive(Serialize)]
struct QuoteAssumptions<'a> {
    configuration: &'a RentalConfiguration,
    contract_fee: Money,
    rate_card: &'a RateCard,
}

/// Price `config`, split `contract_fee` and lay out the 12-month budget.
pub fn build_quote(
    config: &RentalConfiguration,
    contract_fee: Money,
    rate_card: &RateCard,
) -> RentalQuoteResult<ComputationOutput<QuoteResult>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if contract_fee < Decimal::ZERO {
        return Err(RentalQuoteError::InvalidInput {
            field: "contract_fee".into(),
            reason: "Contract fee must be non-negative".into(),
        });
    }

    let breakdown = rent_breakdown(config, rate_card)?;

    let requested = config.contract_installments;
    let installments = clamp_installments(requested);
    if installments as i32 != requested {
        warn!(requested, applied = installments, "contract installments out of range");
        warnings.push(format!(
            "Requested {requested} contract installments; allowed range is \
             {MIN_INSTALLMENTS}-{MAX_INSTALLMENTS}, using {installments}"
        ));
    }
    if config.property_type.has_rooms() && !(1..=2).contains(&config.bedrooms) {
        warnings.push(format!(
            "{} bedrooms is outside the priced range 1-2; no bedroom surcharge applied",
            config.bedrooms
        ));
    }
    for field in config.ignored_fields() {
        warnings.push(format!(
            "'{field}' does not apply to a {} and was ignored",
            config.property_type.label().to_lowercase()
        ));
    }

    let installment = installment_value(contract_fee, requested);
    let schedule = generate_schedule(breakdown.monthly_rent, installment, installments);

    let result = QuoteResult {
        property_type: breakdown.property_type,
        base_rent: breakdown.base_rent,
        adjustments: breakdown.adjustments,
        discount: breakdown.discount,
        monthly_rent: breakdown.monthly_rent,
        contract_fee,
        installments,
        installment_value: installment,
        first_year_total: schedule_total(&schedule),
        schedule,
    };

    let assumptions = QuoteAssumptions {
        configuration: config,
        contract_fee,
        rate_card,
    };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Base rent plus add-ons, apartment no-children discount, contract fee in equal installments over the first months",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::DEFAULT_CONTRACT_FEE;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_house() {
        let mut config = RentalConfiguration::new(PropertyType::House);
        config.bedrooms = 2;
        config.has_garage = true;
        config.contract_installments = 4;

        let out = build_quote(&config, DEFAULT_CONTRACT_FEE, &RateCard::default()).unwrap();
        let q = &out.result;
        assert_eq!(q.monthly_rent, dec!(1450.00));
        assert_eq!(q.installments, 4);
        assert_eq!(q.installment_value, dec!(500.00));
        assert_eq!(q.schedule.len(), 12);
        assert_eq!(q.schedule[3].total_for_month, dec!(1950.00));
        assert_eq!(q.schedule[4].total_for_month, dec!(1450.00));
        assert_eq!(q.first_year_total, dec!(19400.00));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_quote_warns_on_clamped_installments() {
        let mut config = RentalConfiguration::new(PropertyType::Apartment);
        config.contract_installments = 7;

        let out = build_quote(&config, DEFAULT_CONTRACT_FEE, &RateCard::default()).unwrap();
        assert_eq!(out.result.installments, 5);
        assert_eq!(out.result.installment_value, dec!(400.00));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("using 5"));
    }

    #[test]
    fn test_quote_warns_on_ignored_fields() {
        let mut config = RentalConfiguration::new(PropertyType::House);
        config.studio_parking_package = true;

        let out = build_quote(&config, DEFAULT_CONTRACT_FEE, &RateCard::default()).unwrap();
        assert_eq!(out.result.monthly_rent, dec!(900.00));
        assert!(out.warnings.iter().any(|w| w.contains("studio_parking_package")));
    }

    #[test]
    fn test_quote_rejects_negative_fee() {
        let config = RentalConfiguration::new(PropertyType::Studio);
        let err = build_quote(&config, dec!(-1), &RateCard::default()).unwrap_err();
        assert!(matches!(err, RentalQuoteError::InvalidInput { ref field, .. } if field == "contract_fee"));
    }

    #[test]
    fn test_quote_rejects_invalid_rate_card() {
        let card = RateCard {
            house_base: dec!(-900),
            ..RateCard::default()
        };
        let config = RentalConfiguration::new(PropertyType::House);
        assert!(build_quote(&config, DEFAULT_CONTRACT_FEE, &card).is_err());
    }
}
