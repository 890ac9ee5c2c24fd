//! Output formatting module.
//!
//! Human output goes to the terminal with `console` styling; JSON output wraps
//! every report in the same `{operation, status, data, error}` envelope.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;

use human::HumanFormatter;
use json::JsonFormatter;

/// Creates an output formatter based on CLI flags.
///
/// Any `-v` shows record details in human output.
pub fn create_formatter(json: bool, verbose: u8, quiet: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(verbose > 0, quiet))
    }
}
