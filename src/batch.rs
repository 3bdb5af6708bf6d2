//! Batch runner
//!
//! Reads a JSON array of command records, runs them in order against one cart and writes one
//! outcome per line.

use std::{fs, io, path::Path};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::cart::Cart;

/// Errors running a batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// IO error reading input or writing output
    #[error("Failed to access batch file: {0}")]
    Io(#[from] io::Error),

    /// The input is not a JSON array, or an outcome could not be serialized.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run every record in `input` against `cart` and return the outcomes, one compact JSON
/// object per line with no trailing newline.
///
/// # Errors
///
/// Returns a [`BatchError`] if `input` is not a JSON array. Individual records that fail to
/// parse are answered with an `Invalid command` outcome instead.
pub fn process_str(cart: &mut Cart, input: &str) -> Result<String, BatchError> {
    Ok(outcome_lines(cart, input)?.join("\n"))
}

fn outcome_lines(cart: &mut Cart, input: &str) -> Result<Vec<String>, BatchError> {
    let records: Vec<Value> = serde_json::from_str(input)?;

    debug!(records = records.len(), "processing batch");

    let lines = records
        .into_iter()
        .map(|record| serde_json::to_string(&cart.process_record(record)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines)
}

/// Run the batch file at `input` and write the outcomes to `output`.
///
/// Returns the number of records processed.
///
/// # Errors
///
/// Returns a [`BatchError`] if either file cannot be accessed or `input` is not a JSON array.
pub fn run(cart: &mut Cart, input: &Path, output: &Path) -> Result<usize, BatchError> {
    let contents = fs::read_to_string(input)?;
    let lines = outcome_lines(cart, &contents)?;
    let records = lines.len();

    fs::write(output, lines.join("\n"))?;

    info!(path = %output.display(), records, "output file written");

    Ok(records)
}
