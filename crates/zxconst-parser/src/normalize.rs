//! Value Normalizer
//!
//! Turns raw C macro values into Dart constant literals with a fixed chain of
//! text rewrites. There is no expression evaluation: values outside the
//! grammar the rules cover pass through unchanged.

use regex::Regex;
use tracing::trace;
use zxconst_core::{MacroDefinition, RenderedConstant};

/// C constant the headers use that has no Dart equivalent
const UINT64_MAX: &str = "UINT64_MAX";
const UINT64_MAX_HEX: &str = "0xFFFFFFFFFFFFFFFF";

/// One step of the normalization chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteRule {
    /// Replace every known macro name with its raw value
    ExpandMacros,
    /// Drop `(foo_t)` casts
    StripCasts,
    /// `10u` -> `10`
    StripDecimalSuffix,
    /// `0x1Fu` -> `0x1F`
    StripHexSuffix,
    /// `UINT64_MAX` -> `0xFFFFFFFFFFFFFFFF`
    ExpandSentinel,
    /// `(expr)` -> `expr`, one layer
    StripOuterParens,
}

impl RewriteRule {
    pub fn name(&self) -> &'static str {
        match self {
            RewriteRule::ExpandMacros => "expand-macros",
            RewriteRule::StripCasts => "strip-casts",
            RewriteRule::StripDecimalSuffix => "strip-decimal-suffix",
            RewriteRule::StripHexSuffix => "strip-hex-suffix",
            RewriteRule::ExpandSentinel => "expand-sentinel",
            RewriteRule::StripOuterParens => "strip-outer-parens",
        }
    }
}

/// Rewrite chain for macro values
pub struct Normalizer {
    cast: Regex,
    decimal_suffix: Regex,
    hex_suffix: Regex,
}

impl Normalizer {
    /// Rules in the order they are applied
    pub const RULES: [RewriteRule; 6] = [
        RewriteRule::ExpandMacros,
        RewriteRule::StripCasts,
        RewriteRule::StripDecimalSuffix,
        RewriteRule::StripHexSuffix,
        RewriteRule::ExpandSentinel,
        RewriteRule::StripOuterParens,
    ];

    pub fn new() -> Self {
        Self {
            cast: Regex::new(r"\([a-z0-9_]+_t\)").unwrap(),
            decimal_suffix: Regex::new(r"([0-9]+)u").unwrap(),
            hex_suffix: Regex::new(r"(0x[a-fA-F0-9]+)u").unwrap(),
        }
    }

    /// Normalize `value` against every definition from the same header.
    ///
    /// Substitution walks the whole list, so a value may pick up a macro
    /// defined later in the file. It is one pass in list order, not a fixed
    /// point, and matches substrings rather than tokens.
    pub fn normalize(&self, value: &str, defines: &[MacroDefinition]) -> String {
        let mut value = value.to_string();
        for rule in Self::RULES {
            let rewritten = self.apply(rule, &value, defines);
            if rewritten != value {
                trace!("{}: {:?} -> {:?}", rule.name(), value, rewritten);
                value = rewritten;
            }
        }
        value
    }

    /// Apply a single rule
    pub fn apply(&self, rule: RewriteRule, value: &str, defines: &[MacroDefinition]) -> String {
        match rule {
            RewriteRule::ExpandMacros => defines
                .iter()
                .fold(value.to_string(), |acc, def| acc.replace(&def.name, &def.value)),
            RewriteRule::StripCasts => self.cast.replace_all(value, "").into_owned(),
            RewriteRule::StripDecimalSuffix => {
                self.decimal_suffix.replace_all(value, "$1").into_owned()
            }
            RewriteRule::StripHexSuffix => self.hex_suffix.replace_all(value, "$1").into_owned(),
            RewriteRule::ExpandSentinel => value.replace(UINT64_MAX, UINT64_MAX_HEX),
            RewriteRule::StripOuterParens => strip_outer_parens(value).to_string(),
        }
    }

    /// Keep definitions carrying `prefix`, strip it, and normalize the values.
    ///
    /// Unprefixed definitions are still available for substitution.
    pub fn constants(&self, defines: &[MacroDefinition], prefix: &str) -> Vec<RenderedConstant> {
        // Quadratic in the number of defines; header sizes are fixed and small.
        defines
            .iter()
            .filter_map(|def| {
                let short = def.name.strip_prefix(prefix)?;
                Some(RenderedConstant::new(short, self.normalize(&def.value, defines)))
            })
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove one pair of parentheses when they enclose the whole value
fn strip_outer_parens(value: &str) -> &str {
    if value.len() < 2 || !value.starts_with('(') || !value.ends_with(')') {
        return value;
    }

    let mut depth = 0usize;
    for (i, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    // The opening paren closes here; only strip if this is the end
                    return if i == value.len() - 1 {
                        &value[1..i]
                    } else {
                        value
                    };
                }
            }
            _ => {}
        }
    }

    value
}
