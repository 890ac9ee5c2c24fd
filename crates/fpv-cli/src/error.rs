//! Error conversion utilities for CLI.
//!
//! Converts fpv-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use fpv_core::PathError;

/// Converts `PathError` to a user-friendly anyhow error with a hint.
pub fn convert_path_error(err: PathError) -> anyhow::Error {
    match err {
        PathError::AlreadyTerminated { text } => {
            anyhow!(
                "Cannot add '{text}': the path already ends with a file\n\
                 HINT: Only the last component may be a file; remove it first or drop --file."
            )
        }
        PathError::IndexOutOfRange { index, len } => {
            anyhow!(
                "Component index {index} is out of range: the path has {len} component(s)\n\
                 HINT: Indices are zero-based; for absolute paths index 0 is the root."
            )
        }
        PathError::MalformedRecord { kind, field } => {
            anyhow!(
                "State contains a malformed {kind}: field '{field}' is missing or empty\n\
                 HINT: Regenerate the state file with --save-state."
            )
        }
        PathError::InvalidPolicy { reason } => {
            anyhow!(
                "Invalid policy: {reason}\n\
                 HINT: Run `fpv providers <NAME> --json` to see a valid policy layout."
            )
        }
        PathError::UnknownProvider { name } => {
            anyhow!(
                "Unknown provider '{name}'\n\
                 HINT: Run `fpv providers` to list the built-in providers."
            )
        }
        PathError::Snapshot(json_err) => {
            anyhow!("Could not read JSON input: {json_err}")
        }
        PathError::Validation { .. } => anyhow::Error::from(err),
    }
}

/// Adds guidance to a core result.
pub fn add_path_context<T>(result: Result<T, PathError>) -> anyhow::Result<T> {
    result.map_err(convert_path_error)
}
