//! zxconst Core
//!
//! Core types, errors and configuration shared by the zxconst crates.

pub mod config;
pub mod error;
pub mod location;
pub mod types;

pub use config::{FormatterConfig, GeneratorConfig};
pub use error::{Error, Result};
pub use location::Location;
pub use types::*;
