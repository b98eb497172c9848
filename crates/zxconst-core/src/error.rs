//! Error types for zxconst

use std::path::PathBuf;
use thiserror::Error;

use crate::location::Location;

/// zxconst error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Header not found: {}", .0.display())]
    HeaderNotFound(PathBuf),

    /// A `#define` that is neither object-like nor function-like
    #[error("Unrecognized line: {line} in {location}")]
    UnrecognizedMacro { location: Location, line: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Formatter error: {0}")]
    Format(String),

    #[error("Generated output is out of date: {}", .0.display())]
    Stale(PathBuf),
}

/// Result type alias for zxconst
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_macro_names_file_and_line() {
        let err = Error::UnrecognizedMacro {
            location: Location::new("types.h", 7),
            line: "#define zx_lower 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("#define zx_lower 1"));
        assert!(msg.contains("types.h:7"));
    }
}
