//! Prompt-driven collection of a [`RentalConfiguration`].
//!
//! [`InputSource`] is the capability the questionnaire needs. [`LineInput`]
//! implements it over any line reader and writer, re-asking until the
//! answer is valid, so a terminal and a scripted test drive the same code.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::contract::{MAX_INSTALLMENTS, MIN_INSTALLMENTS};
use crate::error::RentalQuoteError;
use crate::pricing::{PropertyType, RentalConfiguration};
use crate::RentalQuoteResult;

pub trait InputSource {
    /// Index into `options` of the chosen entry.
    fn request_choice(&mut self, prompt: &str, options: &[&str]) -> RentalQuoteResult<usize>;

    /// Integer within `min..=max`; an empty answer takes `default`.
    fn request_integer(
        &mut self,
        prompt: &str,
        default: i64,
        min: Option<i64>,
        max: Option<i64>,
    ) -> RentalQuoteResult<i64>;

    fn request_boolean(&mut self, prompt: &str) -> RentalQuoteResult<bool>;
}

/// Line-oriented prompts over a reader/writer pair.
pub struct LineInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn say(&mut self, text: &str) -> RentalQuoteResult<()> {
        writeln!(self.writer, "{text}").map_err(prompt_failure)
    }

    fn ask(&mut self, prompt: &str) -> RentalQuoteResult<String> {
        write!(self.writer, "{prompt}").map_err(prompt_failure)?;
        self.writer.flush().map_err(prompt_failure)?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(prompt_failure)?;
        if read == 0 {
            return Err(RentalQuoteError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

fn prompt_failure(e: std::io::Error) -> RentalQuoteError {
    RentalQuoteError::PromptFailure(e.to_string())
}

impl<R: BufRead, W: Write> InputSource for LineInput<R, W> {
    fn request_choice(&mut self, prompt: &str, options: &[&str]) -> RentalQuoteResult<usize> {
        self.say(prompt)?;
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("{}) {}", i + 1, option))?;
        }
        let numbers: Vec<String> = (1..=options.len()).map(|n| n.to_string()).collect();
        let question = format!("Option ({}): ", numbers.join("/"));

        loop {
            let answer = self.ask(&question)?;
            if let Ok(n) = answer.parse::<usize>() {
                if (1..=options.len()).contains(&n) {
                    return Ok(n - 1);
                }
            }
            debug!(%answer, "rejected choice");
            self.say("Invalid option.")?;
        }
    }

    fn request_integer(
        &mut self,
        prompt: &str,
        default: i64,
        min: Option<i64>,
        max: Option<i64>,
    ) -> RentalQuoteResult<i64> {
        let question = format!("{prompt} [{default}]: ");
        loop {
            let answer = self.ask(&question)?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<i64>() {
                Ok(v) if min.is_some_and(|lo| v < lo) || max.is_some_and(|hi| v > hi) => {
                    debug!(value = v, "rejected out-of-range integer");
                    let lo = min.map(|n| n.to_string()).unwrap_or_default();
                    let hi = max.map(|n| n.to_string()).unwrap_or_default();
                    self.say(&format!("Value outside the allowed range ({lo}..{hi})."))?;
                }
                Ok(v) => return Ok(v),
                Err(_) => {
                    debug!(%answer, "rejected non-integer");
                    self.say("Enter a valid whole number.")?;
                }
            }
        }
    }

    fn request_boolean(&mut self, prompt: &str) -> RentalQuoteResult<bool> {
        let question = format!("{prompt} (y/n): ");
        loop {
            let answer = self.ask(&question)?.to_lowercase();
            match answer.as_str() {
                "y" | "yes" | "s" | "sim" => return Ok(true),
                "n" | "no" | "nao" | "não" => return Ok(false),
                _ => {
                    debug!(%answer, "rejected yes/no answer");
                    self.say("Invalid answer. Type y or n.")?;
                }
            }
        }
    }
}

/// Walk the agency questionnaire and build the configuration.
pub fn collect_configuration<S: InputSource + ?Sized>(
    source: &mut S,
) -> RentalQuoteResult<RentalConfiguration> {
    let labels: Vec<&str> = PropertyType::ALL.iter().map(|t| t.label()).collect();
    let choice = source.request_choice("Choose the property type:", &labels)?;
    let property_type = PropertyType::ALL.get(choice).copied().ok_or_else(|| {
        RentalQuoteError::InvalidInput {
            field: "property_type".into(),
            reason: format!("choice {choice} is not one of the {} options", labels.len()),
        }
    })?;
    let mut config = RentalConfiguration::new(property_type);

    if config.property_type.has_rooms() {
        let bedrooms = source.request_integer("Number of bedrooms (1 or 2)", 1, Some(1), Some(2))?;
        config.bedrooms = narrow("bedrooms", bedrooms)?;
        config.has_garage = source.request_boolean("Add a garage space?")?;
    } else {
        config.studio_parking_package =
            source.request_boolean("Add the 2-space parking package for 250.00?")?;
        if config.studio_parking_package {
            let extra = source.request_integer(
                "Extra spaces beyond the package (60.00 each)",
                0,
                Some(0),
                Some(i64::from(u32::MAX)),
            )?;
            config.studio_extra_spaces = narrow("studio_extra_spaces", extra)?;
        }
    }

    config.has_children = source.request_boolean(
        "Are there children in the household? (apartments without children get 5% off)",
    )?;

    let installments = source.request_integer(
        "Contract installments (1 to 5)",
        i64::from(MIN_INSTALLMENTS),
        Some(i64::from(MIN_INSTALLMENTS)),
        Some(i64::from(MAX_INSTALLMENTS)),
    )?;
    config.contract_installments = narrow("contract_installments", installments)?;

    Ok(config)
}

/// Fit an answer into the field's integer type instead of wrapping it.
fn narrow<T: TryFrom<i64>>(field: &str, value: i64) -> RentalQuoteResult<T> {
    T::try_from(value).map_err(|_| RentalQuoteError::InvalidInput {
        field: field.into(),
        reason: format!("{value} is out of range"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::io::Cursor;

    fn run_script(script: &str) -> (RentalQuoteResult<RentalConfiguration>, String) {
        let mut input = LineInput::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let result = collect_configuration(&mut input);
        let (_, out) = input.into_inner();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_apartment_script() {
        let (result, _) = run_script("1\n2\ny\nn\n3\n");
        let config = result.unwrap();
        assert_eq!(config.property_type, PropertyType::Apartment);
        assert_eq!(config.bedrooms, 2);
        assert!(config.has_garage);
        assert!(!config.has_children);
        assert_eq!(config.contract_installments, 3);
    }

    #[test]
    fn test_studio_script_with_defaults() {
        let (result, _) = run_script("3\nsim\n\nnão\n\n");
        let config = result.unwrap();
        assert_eq!(config.property_type, PropertyType::Studio);
        assert!(config.studio_parking_package);
        assert_eq!(config.studio_extra_spaces, 0);
        assert!(!config.has_children);
        assert_eq!(config.contract_installments, 1);
    }

    #[test]
    fn test_invalid_answers_are_asked_again() {
        let (result, transcript) = run_script("9\nhouse\n2\nthree\n5\n2\nmaybe\nn\ny\n6\n0\n5\n");
        let config = result.unwrap();
        assert_eq!(config.property_type, PropertyType::House);
        assert_eq!(config.bedrooms, 2);
        assert!(!config.has_garage);
        assert!(config.has_children);
        assert_eq!(config.contract_installments, 5);
        assert_eq!(transcript.matches("Invalid option.").count(), 2);
        assert_eq!(transcript.matches("Enter a valid whole number.").count(), 1);
        assert_eq!(transcript.matches("outside the allowed range").count(), 3);
        assert_eq!(transcript.matches("Invalid answer").count(), 1);
    }

    #[test]
    fn test_input_closed_mid_questionnaire() {
        let (result, _) = run_script("2\n1\n");
        assert!(matches!(result, Err(RentalQuoteError::InputClosed)));
    }

    struct Scripted {
        choices: VecDeque<usize>,
        integers: VecDeque<i64>,
        booleans: VecDeque<bool>,
    }

    impl InputSource for Scripted {
        fn request_choice(&mut self, _: &str, _: &[&str]) -> RentalQuoteResult<usize> {
            self.choices.pop_front().ok_or(RentalQuoteError::InputClosed)
        }

        fn request_integer(
            &mut self,
            _: &str,
            _: i64,
            _: Option<i64>,
            _: Option<i64>,
        ) -> RentalQuoteResult<i64> {
            self.integers.pop_front().ok_or(RentalQuoteError::InputClosed)
        }

        fn request_boolean(&mut self, _: &str) -> RentalQuoteResult<bool> {
            self.booleans.pop_front().ok_or(RentalQuoteError::InputClosed)
        }
    }

    #[test]
    fn test_studio_without_package_skips_extra_spaces() {
        let mut source = Scripted {
            choices: VecDeque::from([2]),
            integers: VecDeque::from([4]),
            booleans: VecDeque::from([false, true]),
        };
        let config = collect_configuration(&mut source).unwrap();
        assert_eq!(config.property_type, PropertyType::Studio);
        assert!(!config.studio_parking_package);
        assert_eq!(config.studio_extra_spaces, 0);
        assert_eq!(config.contract_installments, 4);
        assert!(source.integers.is_empty());
    }

    #[test]
    fn test_choice_out_of_bounds_is_rejected() {
        let mut source = Scripted {
            choices: VecDeque::from([3]),
            integers: VecDeque::new(),
            booleans: VecDeque::new(),
        };
        let err = collect_configuration(&mut source).unwrap_err();
        assert!(
            matches!(err, RentalQuoteError::InvalidInput { ref field, .. } if field == "property_type")
        );
    }

    #[test]
    fn test_negative_bedrooms_do_not_wrap() {
        let mut source = Scripted {
            choices: VecDeque::from([0]),
            integers: VecDeque::from([-1, 2]),
            booleans: VecDeque::from([false, true]),
        };
        let err = collect_configuration(&mut source).unwrap_err();
        assert!(matches!(err, RentalQuoteError::InvalidInput { ref field, .. } if field == "bedrooms"));
    }

    #[test]
    fn test_oversized_installments_do_not_wrap() {
        let mut source = Scripted {
            choices: VecDeque::from([1]),
            integers: VecDeque::from([1, i64::from(i32::MAX) + 1]),
            booleans: VecDeque::from([false, true]),
        };
        let err = collect_configuration(&mut source).unwrap_err();
        assert!(
            matches!(err, RentalQuoteError::InvalidInput { ref field, .. } if field == "contract_installments")
        );
    }
}
