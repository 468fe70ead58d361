use std::path::Path;

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info};

use rental_quote_core::contract::DEFAULT_CONTRACT_FEE;
use rental_quote_core::pricing::{self, PropertyType, RateCard, RentalConfiguration};
use rental_quote_core::quote;
use rental_quote_core::schedule::{self, DEFAULT_OUTPUT_DIR};

use crate::input;

/// Where the rental configuration comes from
#[derive(Args)]
pub struct ConfigArgs {
    /// Path to JSON configuration file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property type: apartment, house or studio
    #[arg(long)]
    pub property_type: Option<String>,

    /// Number of bedrooms (apartment/house)
    #[arg(long, default_value_t = 1, requires = "property_type")]
    pub bedrooms: u32,

    /// Add a garage space (apartment/house)
    #[arg(long, requires = "property_type")]
    pub garage: bool,

    /// Add the 2-space parking package (studio)
    #[arg(long, requires = "property_type")]
    pub parking_package: bool,

    /// Extra parking spaces beyond the package (studio)
    #[arg(long, default_value_t = 0, requires = "property_type")]
    pub extra_spaces: u32,

    /// No children in the household
    #[arg(long, requires = "property_type")]
    pub no_children: bool,

    /// Contract installments, 1 to 5
    #[arg(long, default_value_t = 1, allow_hyphen_values = true, requires = "property_type")]
    pub installments: i32,

    /// Path to JSON rate card overriding the standard tariff
    #[arg(long)]
    pub rate_card: Option<String>,
}

/// Arguments for a full quote with its 12-month schedule
#[derive(Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Total contract fee split across the installments
    #[arg(long, default_value_t = DEFAULT_CONTRACT_FEE)]
    pub contract_fee: Decimal,

    /// Directory the schedule CSV is written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// File name for the schedule CSV (default: timestamped)
    #[arg(long)]
    pub filename: Option<String>,

    /// Skip writing the schedule CSV
    #[arg(long)]
    pub no_file: bool,
}

/// Arguments for the monthly rent only
#[derive(Args)]
pub struct RentArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = resolve_configuration(&args.config)?;
    let rate_card = resolve_rate_card(&args.config)?;

    let output = quote::build_quote(&config, args.contract_fee, &rate_card)?;
    let mut value = serde_json::to_value(&output)?;

    if args.no_file {
        debug!("schedule file skipped");
    } else {
        let path = schedule::to_csv(
            &output.result.schedule,
            Path::new(&args.output_dir),
            args.filename.as_deref(),
        )?;
        info!(path = %path.display(), "quote saved");
        if let Value::Object(ref mut map) = value {
            map.insert(
                "schedule_file".to_string(),
                Value::String(path.display().to_string()),
            );
        }
    }

    Ok(value)
}

pub fn run_rent(args: RentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = resolve_configuration(&args.config)?;
    let rate_card = resolve_rate_card(&args.config)?;
    let breakdown = pricing::rent_breakdown(&config, &rate_card)?;
    Ok(serde_json::to_value(breakdown)?)
}

/// `--input` file, then flags, then piped stdin, then terminal prompts.
fn resolve_configuration(
    args: &ConfigArgs,
) -> Result<RentalConfiguration, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        debug!(%path, "configuration from file");
        return input::file::read_json(path);
    }

    if let Some(config) = configuration_from_flags(args)? {
        return Ok(config);
    }

    if let Some(data) = input::stdin::read_stdin()? {
        debug!("configuration from stdin");
        return Ok(serde_json::from_value(data)?);
    }

    if !input::stdin::is_interactive() {
        return Err(
            "--input <file.json>, --property-type, piped JSON or a terminal is required".into(),
        );
    }
    input::prompt::prompt_configuration()
}

/// Build the configuration from individual flags, if `--property-type` was given.
///
/// Out-of-range installment counts pass through; the quote clamps them and warns.
fn configuration_from_flags(
    args: &ConfigArgs,
) -> Result<Option<RentalConfiguration>, Box<dyn std::error::Error>> {
    let Some(ref property_type) = args.property_type else {
        return Ok(None);
    };
    let property_type: PropertyType = property_type.parse()?;
    Ok(Some(RentalConfiguration {
        property_type,
        bedrooms: args.bedrooms,
        has_garage: args.garage,
        studio_parking_package: args.parking_package,
        studio_extra_spaces: args.extra_spaces,
        has_children: !args.no_children,
        contract_installments: args.installments,
    }))
}

fn resolve_rate_card(args: &ConfigArgs) -> Result<RateCard, Box<dyn std::error::Error>> {
    match args.rate_card {
        Some(ref path) => {
            let card: RateCard = input::file::read_json(path)?;
            card.validate()?;
            Ok(card)
        }
        None => Ok(RateCard::default()),
    }
}
