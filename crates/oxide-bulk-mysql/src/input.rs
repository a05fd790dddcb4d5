//! Reading rows from JSON input.
//!
//! The input is a JSON array whose elements are row objects. Elements are
//! not validated here; an element that is not an object fails the chunk it
//! lands in when the statement is assembled.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Errors raised while loading rows.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path of the input, `-` for stdin.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid JSON.
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is valid JSON but not an array.
    #[error("expected a JSON array of rows, found {0}")]
    NotAnArray(&'static str),
}

/// Loads rows from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a JSON array.
pub fn load_rows(path: &Path) -> Result<Vec<Value>, InputError> {
    let io_error = |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map_err(io_error)?;
        text
    } else {
        std::fs::read_to_string(path).map_err(io_error)?
    };

    parse_rows(&text)
}

/// Parses a JSON array of rows.
///
/// # Errors
///
/// Returns an error if `text` is not JSON or not an array.
pub fn parse_rows(text: &str) -> Result<Vec<Value>, InputError> {
    match serde_json::from_str(text)? {
        Value::Array(rows) => Ok(rows),
        Value::Object(_) => Err(InputError::NotAnArray("object")),
        Value::Null => Err(InputError::NotAnArray("null")),
        Value::Bool(_) => Err(InputError::NotAnArray("boolean")),
        Value::Number(_) => Err(InputError::NotAnArray("number")),
        Value::String(_) => Err(InputError::NotAnArray("string")),
    }
}
