//! zxconst Codegen
//!
//! Renders extracted constants as a Dart part file, pipes it through an
//! external formatter and writes it out.
//!
//! ## Modules
//!
//! - `dart` - Dart source rendering
//! - `format` - External formatter integration
//! - `generate` - The locate, extract, render, format and write pipeline

pub mod dart;
pub mod format;
pub mod generate;

pub use dart::DartRenderer;
pub use format::{ExternalFormatter, FormatError, Formatter};
pub use generate::{GenerationReport, Generator};
