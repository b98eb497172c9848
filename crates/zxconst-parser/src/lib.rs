//! zxconst Parser
//!
//! Reads object-like `#define` constants out of C headers and rewrites their
//! values into Dart literals.
//!
//! ## Modules
//!
//! - `locate` - Header and output path resolution
//! - `extract` - `#define` extraction
//! - `normalize` - C value to Dart literal rewriting

pub mod extract;
pub mod locate;
pub mod normalize;

pub use extract::MacroExtractor;
pub use locate::HeaderLocator;
pub use normalize::{Normalizer, RewriteRule};

use std::path::Path;
use zxconst_core::{RenderedConstant, Result};

/// Extract a header and turn its prefixed macros into constants
pub fn read_constants(path: &Path, prefix: &str) -> Result<Vec<RenderedConstant>> {
    let defines = MacroExtractor::new().extract_file(path)?;
    Ok(Normalizer::new().constants(&defines, prefix))
}
