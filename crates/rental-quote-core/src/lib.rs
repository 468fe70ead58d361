pub mod contract;
pub mod error;
pub mod interaction;
pub mod pricing;
pub mod quote;
pub mod schedule;
pub mod types;

pub use error::RentalQuoteError;
pub use types::*;

/// Standard result type for all rental-quote operations
pub type RentalQuoteResult<T> = Result<T, RentalQuoteError>;
