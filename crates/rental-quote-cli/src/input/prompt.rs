use std::io;

use rental_quote_core::interaction::{collect_configuration, LineInput};
use rental_quote_core::pricing::RentalConfiguration;

/// Run the questionnaire on the terminal.
///
/// Prompts go to stderr so stdout carries only the formatted quote.
pub fn prompt_configuration() -> Result<RentalConfiguration, Box<dyn std::error::Error>> {
    eprintln!("=== Rental Quote Generator ===");
    let stdin = io::stdin();
    let mut source = LineInput::new(stdin.lock(), io::stderr());
    Ok(collect_configuration(&mut source)?)
}
