//! Monthly rent pricing rules.
//!
//! Maps a [`RentalConfiguration`] to a base rent and a fully adjusted
//! monthly rent. Additive adjustments (bedrooms, garage, studio parking)
//! are applied first, then the apartment no-children discount, then the
//! total is rounded to cents with half-to-even rounding.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RentalQuoteError;
use crate::types::{round_money, Money, Rate};
use crate::RentalQuoteResult;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of property being rented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Studio,
    ];

    /// Whether bedroom count and garage are priced for this type.
    pub fn has_rooms(self) -> bool {
        matches!(self, PropertyType::Apartment | PropertyType::House)
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Studio => "Studio",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = RentalQuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apartment" | "apartamento" => Ok(PropertyType::Apartment),
            "house" | "casa" => Ok(PropertyType::House),
            "studio" | "estudio" | "estúdio" => Ok(PropertyType::Studio),
            _ => Err(RentalQuoteError::InvalidPropertyType(s.to_string())),
        }
    }
}

impl TryFrom<String> for PropertyType {
    type Error = RentalQuoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Everything the agency asks about before quoting a rent.
///
/// Fields that do not apply to `property_type` are ignored when pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalConfiguration {
    pub property_type: PropertyType,
    /// 1 or 2; only priced for apartments and houses
    #[serde(default = "default_bedrooms")]
    pub bedrooms: u32,
    /// Apartments and houses only
    #[serde(default)]
    pub has_garage: bool,
    /// Studio 2-space parking package
    #[serde(default)]
    pub studio_parking_package: bool,
    /// Spaces beyond the package; priced only with the package
    #[serde(default)]
    pub studio_extra_spaces: u32,
    #[serde(default = "default_has_children")]
    pub has_children: bool,
    /// Requested contract installments, clamped to 1..=5 when used
    #[serde(default = "default_installments")]
    pub contract_installments: i32,
}

fn default_bedrooms() -> u32 {
    1
}

fn default_has_children() -> bool {
    true
}

fn default_installments() -> i32 {
    1
}

impl RentalConfiguration {
    /// Configuration with every optional field at its default.
    pub fn new(property_type: PropertyType) -> Self {
        Self {
            property_type,
            bedrooms: default_bedrooms(),
            has_garage: false,
            studio_parking_package: false,
            studio_extra_spaces: 0,
            has_children: default_has_children(),
            contract_installments: default_installments(),
        }
    }

    /// Fields that were set but carry no price for this property type.
    pub fn ignored_fields(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if self.property_type.has_rooms() {
            if self.studio_parking_package {
                ignored.push("studio_parking_package");
            }
            if self.studio_extra_spaces > 0 {
                ignored.push("studio_extra_spaces");
            }
        } else {
            if self.bedrooms != 1 {
                ignored.push("bedrooms");
            }
            if self.has_garage {
                ignored.push("has_garage");
            }
            if !self.studio_parking_package && self.studio_extra_spaces > 0 {
                ignored.push("studio_extra_spaces");
            }
        }
        ignored
    }
}

/// The agency tariff. `RateCard::default()` is the published price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateCard {
    pub apartment_base: Money,
    pub house_base: Money,
    pub studio_base: Money,
    pub apartment_second_bedroom: Money,
    pub house_second_bedroom: Money,
    pub garage: Money,
    /// Covers two spaces
    pub studio_parking_package: Money,
    pub studio_extra_space: Money,
    /// Multiplier applied to apartments without children
    pub apartment_no_children_factor: Rate,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            apartment_base: dec!(700.00),
            house_base: dec!(900.00),
            studio_base: dec!(1200.00),
            apartment_second_bedroom: dec!(200.00),
            house_second_bedroom: dec!(250.00),
            garage: dec!(300.00),
            studio_parking_package: dec!(250.00),
            studio_extra_space: dec!(60.00),
            apartment_no_children_factor: dec!(0.95),
        }
    }
}

impl RateCard {
    pub fn validate(&self) -> RentalQuoteResult<()> {
        let amounts = [
            ("apartment_base", self.apartment_base),
            ("house_base", self.house_base),
            ("studio_base", self.studio_base),
            ("apartment_second_bedroom", self.apartment_second_bedroom),
            ("house_second_bedroom", self.house_second_bedroom),
            ("garage", self.garage),
            ("studio_parking_package", self.studio_parking_package),
            ("studio_extra_space", self.studio_extra_space),
        ];
        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(RentalQuoteError::InvalidInput {
                    field: field.into(),
                    reason: "Rate card amounts must be non-negative".into(),
                });
            }
        }
        let factor = self.apartment_no_children_factor;
        if factor < Decimal::ZERO || factor > Decimal::ONE {
            return Err(RentalQuoteError::InvalidInput {
                field: "apartment_no_children_factor".into(),
                reason: "Discount factor must be between 0 and 1".into(),
            });
        }
        Ok(())
    }

    pub fn base_rent(&self, property_type: PropertyType) -> Money {
        match property_type {
            PropertyType::Apartment => self.apartment_base,
            PropertyType::House => self.house_base,
            PropertyType::Studio => self.studio_base,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One line of the rent build-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentAdjustment {
    pub label: String,
    pub amount: Money,
}

/// Itemised monthly rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentBreakdown {
    pub property_type: PropertyType,
    pub base_rent: Money,
    /// Additive items, in the order they are applied
    pub adjustments: Vec<RentAdjustment>,
    /// Base rent plus all additive items
    pub subtotal: Money,
    /// Negative amount taken off by the apartment discount, zero otherwise
    pub discount: Money,
    pub monthly_rent: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Unadjusted monthly price for a property type on the standard tariff.
pub fn base_rent(property_type: PropertyType) -> Money {
    RateCard::default().base_rent(property_type)
}

/// Base rent for a free-text property type.
///
/// Fails with [`RentalQuoteError::InvalidPropertyType`] for anything that
/// is not an apartment, house or studio.
pub fn base_rent_for(property_type: &str) -> RentalQuoteResult<Money> {
    let parsed: PropertyType = property_type.parse()?;
    Ok(base_rent(parsed))
}

/// Monthly rent on the standard tariff, rounded to cents.
pub fn compute_monthly_rent(config: &RentalConfiguration) -> Money {
    build_breakdown(config, &RateCard::default()).monthly_rent
}

/// Monthly rent on a custom tariff.
pub fn compute_monthly_rent_with(
    config: &RentalConfiguration,
    rate_card: &RateCard,
) -> RentalQuoteResult<Money> {
    Ok(rent_breakdown(config, rate_card)?.monthly_rent)
}

/// Itemise the rent for `config` on `rate_card`.
pub fn rent_breakdown(
    config: &RentalConfiguration,
    rate_card: &RateCard,
) -> RentalQuoteResult<RentBreakdown> {
    rate_card.validate()?;
    Ok(build_breakdown(config, rate_card))
}

fn build_breakdown(config: &RentalConfiguration, rate_card: &RateCard) -> RentBreakdown {
    let property_type = config.property_type;
    let base = rate_card.base_rent(property_type);
    let mut adjustments = Vec::new();

    match property_type {
        PropertyType::Apartment if config.bedrooms == 2 => adjustments.push(RentAdjustment {
            label: "Second bedroom".into(),
            amount: rate_card.apartment_second_bedroom,
        }),
        PropertyType::House if config.bedrooms == 2 => adjustments.push(RentAdjustment {
            label: "Second bedroom".into(),
            amount: rate_card.house_second_bedroom,
        }),
        _ => {}
    }

    if property_type.has_rooms() && config.has_garage {
        adjustments.push(RentAdjustment {
            label: "Garage space".into(),
            amount: rate_card.garage,
        });
    }

    if property_type == PropertyType::Studio && config.studio_parking_package {
        adjustments.push(RentAdjustment {
            label: "Parking package (2 spaces)".into(),
            amount: rate_card.studio_parking_package,
        });
        if config.studio_extra_spaces > 0 {
            adjustments.push(RentAdjustment {
                label: format!("Extra parking spaces x{}", config.studio_extra_spaces),
                amount: rate_card.studio_extra_space * Decimal::from(config.studio_extra_spaces),
            });
        }
    }

    let subtotal = base + adjustments.iter().map(|a| a.amount).sum::<Money>();

    let discounted = if property_type == PropertyType::Apartment && !config.has_children {
        subtotal * rate_card.apartment_no_children_factor
    } else {
        subtotal
    };
    let monthly_rent = round_money(discounted);

    RentBreakdown {
        property_type,
        base_rent: base,
        adjustments,
        subtotal,
        discount: monthly_rent - round_money(subtotal),
        monthly_rent,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
