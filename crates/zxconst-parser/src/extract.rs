//! Macro Extractor
//!
//! Collects object-like `#define NAME VALUE` lines from a header, in file
//! order. Function-like macros are skipped. Any other `#define` is fatal:
//! silently dropping a constant would leave the generated file incomplete.

use regex::Regex;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;
use zxconst_core::{Error, Location, MacroDefinition, Result};

const DEFINE_MARKER: &str = "#define";

/// `#define` line scanner
pub struct MacroExtractor {
    object_like: Regex,
    function_like: Regex,
}

impl MacroExtractor {
    pub fn new() -> Self {
        Self {
            object_like: Regex::new(r"^#define\s+(?P<symbol>[A-Z0-9_]+)\s+(?P<value>\S.*)")
                .unwrap(),
            function_like: Regex::new(r"^#define\s+[A-Za-z0-9_]+\(").unwrap(),
        }
    }

    /// Extract definitions from a header file
    pub fn extract_file(&self, path: &Path) -> Result<Vec<MacroDefinition>> {
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::HeaderNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        self.extract_str(&source, &path.to_string_lossy())
    }

    /// Extract definitions from header text; `file` is only used for locations
    pub fn extract_str(&self, source: &str, file: &str) -> Result<Vec<MacroDefinition>> {
        let mut defines = Vec::new();

        for (index, line) in source.lines().enumerate() {
            let line = line.trim_end();
            if !line.starts_with(DEFINE_MARKER) {
                continue;
            }

            let line_no = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let location = Location::new(file, line_no);

            if let Some(caps) = self.object_like.captures(line) {
                let def = MacroDefinition::new(&caps["symbol"], &caps["value"], location);
                debug!("{}: {} = {}", def.location, def.name, def.value);
                defines.push(def);
            } else if self.function_like.is_match(line) {
                debug!("{}: skipping function-like macro", location);
            } else {
                return Err(Error::UnrecognizedMacro {
                    location,
                    line: line.to_string(),
                });
            }
        }

        Ok(defines)
    }
}

impl Default for MacroExtractor {
    fn default() -> Self {
        Self::new()
    }
}
