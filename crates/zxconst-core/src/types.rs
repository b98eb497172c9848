//! Core type definitions

use serde::{Deserialize, Serialize};
use crate::location::Location;

/// Object-like macro found in a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDefinition {
    /// Macro symbol, e.g. `ZX_ERR_BAD_STATE`
    pub name: String,
    /// Raw replacement text as written in the header
    pub value: String,
    /// Where the definition was found
    pub location: Location,
}

impl MacroDefinition {
    /// Create a new macro definition
    pub fn new(name: impl Into<String>, value: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            location,
        }
    }
}

/// A constant ready to be emitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedConstant {
    /// Name with the symbol prefix stripped
    pub name: String,
    /// Normalized literal
    pub value: String,
}

impl RenderedConstant {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Integer value of a plain decimal or hex literal.
    ///
    /// Verification helper for checking generated lookups; the generator
    /// itself never evaluates values.
    ///
    /// Hex literals are read as 64-bit two's complement, so
    /// `0xFFFFFFFFFFFFFFFF` is `-1`. Anything else (shifts, names) is `None`.
    pub fn int_value(&self) -> Option<i64> {
        let text = self.value.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text),
        };

        let magnitude = match digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16).ok()? as i64,
            None => digits.parse::<i64>().ok()?,
        };

        Some(if negative {
            magnitude.wrapping_neg()
        } else {
            magnitude
        })
    }
}

/// Which input header a definition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderKind {
    Errors,
    Types,
}

impl HeaderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderKind::Errors => "errors",
            HeaderKind::Types => "types",
        }
    }
}

/// Constants grouped by the header they came from, in header order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantSet {
    /// Status codes; these also feed the status-name lookup
    pub errors: Vec<RenderedConstant>,
    /// Everything else
    pub types: Vec<RenderedConstant>,
}

impl ConstantSet {
    /// All constants, errors first
    pub fn iter(&self) -> impl Iterator<Item = &RenderedConstant> {
        self.errors.iter().chain(self.types.iter())
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.types.is_empty()
    }

    /// Same answer the generated `getStringForStatus` gives for `code`.
    ///
    /// Verification helper: this mirrors the Dart lookup for values that are
    /// plain literals. It is not what gets emitted; see `DartRenderer`.
    pub fn status_name(&self, code: i64) -> String {
        self.errors
            .iter()
            .find(|c| c.int_value() == Some(code))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("(unknown: {})", code))
    }
}
