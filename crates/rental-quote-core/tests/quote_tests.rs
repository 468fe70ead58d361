use rental_quote_core::contract::{installment_value, DEFAULT_CONTRACT_FEE};
use rental_quote_core::interaction::{collect_configuration, LineInput};
use rental_quote_core::pricing::{
    base_rent_for, compute_monthly_rent, PropertyType, RateCard, RentalConfiguration,
};
use rental_quote_core::quote::build_quote;
use rental_quote_core::schedule::{generate_schedule, render_csv, to_csv};
use rental_quote_core::RentalQuoteError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Cursor;
use tempfile::TempDir;

// ===========================================================================
// Pricing rules
// ===========================================================================

#[test]
fn test_every_configuration_is_non_negative_and_stable() {
    for property_type in PropertyType::ALL {
        for bedrooms in [1, 2] {
            for has_garage in [false, true] {
                for package in [false, true] {
                    for extra in [0, 1, 3] {
                        for has_children in [false, true] {
                            let config = RentalConfiguration {
                                property_type,
                                bedrooms,
                                has_garage,
                                studio_parking_package: package,
                                studio_extra_spaces: extra,
                                has_children,
                                contract_installments: 1,
                            };
                            let first = compute_monthly_rent(&config);
                            let second = compute_monthly_rent(&config);
                            assert_eq!(first, second, "{config:?}");
                            assert!(first >= Decimal::ZERO, "{config:?}");
                            assert_eq!(first, first.round_dp(2), "{config:?}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_known_answers() {
    let mut apartment = RentalConfiguration::new(PropertyType::Apartment);
    apartment.has_children = false;
    assert_eq!(compute_monthly_rent(&apartment), dec!(665.00));

    let mut studio = RentalConfiguration::new(PropertyType::Studio);
    studio.studio_parking_package = true;
    studio.studio_extra_spaces = 1;
    assert_eq!(compute_monthly_rent(&studio), dec!(1510.00));

    let mut house = RentalConfiguration::new(PropertyType::House);
    house.bedrooms = 2;
    house.has_garage = true;
    assert_eq!(compute_monthly_rent(&house), dec!(1450.00));
}

#[test]
fn test_unknown_property_type_produces_nothing() {
    let err = base_rent_for("penthouse").unwrap_err();
    assert!(matches!(err, RentalQuoteError::InvalidPropertyType(_)));

    let parsed: Result<RentalConfiguration, _> =
        serde_json::from_str(r#"{"property_type": "penthouse", "contract_installments": 2}"#);
    assert!(parsed.is_err());
}

// ===========================================================================
// Contract installments and schedule
// ===========================================================================

#[test]
fn test_installment_known_answers() {
    assert_eq!(installment_value(DEFAULT_CONTRACT_FEE, 3), dec!(666.67));
    assert_eq!(installment_value(DEFAULT_CONTRACT_FEE, 7), dec!(400.00));
}

#[test]
fn test_schedule_known_answer() {
    let rows = generate_schedule(dec!(700.00), dec!(400.00), 2);
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].total_for_month, dec!(1100.00));
    assert_eq!(rows[1].total_for_month, dec!(1100.00));
    assert!(rows[2..].iter().all(|r| r.total_for_month == dec!(700.00)));
}

// ===========================================================================
// End to end
// ===========================================================================

#[test]
fn test_prompted_quote_to_file() {
    // Apartment, 1 bedroom, no garage, no children, 3 installments
    let script = "1\n1\nn\nn\n3\n";
    let mut input = LineInput::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let config = collect_configuration(&mut input).unwrap();

    let out = build_quote(&config, DEFAULT_CONTRACT_FEE, &RateCard::default()).unwrap();
    assert_eq!(out.result.monthly_rent, dec!(665.00));
    assert_eq!(out.result.installment_value, dec!(666.67));

    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("output");
    let path = to_csv(&out.result.schedule, &dir, Some("apartment.csv")).unwrap();
    assert_eq!(path, dir.join("apartment.csv"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, render_csv(&out.result.schedule).unwrap());

    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[1], "1,665.00,666.67,1331.67");
    assert_eq!(lines[4], "4,665.00,0.00,665.00");
}

#[test]
fn test_quote_json_shape() {
    let config: RentalConfiguration = serde_json::from_str(
        r#"{"property_type": "studio", "studio_parking_package": true, "studio_extra_spaces": 2, "contract_installments": 5}"#,
    )
    .unwrap();
    let out = build_quote(&config, DEFAULT_CONTRACT_FEE, &RateCard::default()).unwrap();
    let value = serde_json::to_value(&out).unwrap();

    assert_eq!(value["result"]["property_type"], "studio");
    let rent: Decimal = value["result"]["monthly_rent"].as_str().unwrap().parse().unwrap();
    assert_eq!(rent, dec!(1570.00));
    assert_eq!(value["result"]["schedule"].as_array().unwrap().len(), 12);
    assert_eq!(value["assumptions"]["configuration"]["studio_extra_spaces"], 2);
}
