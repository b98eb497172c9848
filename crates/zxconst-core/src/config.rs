//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Generator configuration
///
/// Every field has a default matching the Zircon/Dart package layout; a YAML
/// file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Only macros with this prefix become constants
    pub prefix: String,

    /// Name of the Dart constant holder class
    pub class_name: String,

    /// Dart library the generated file is a part of
    pub library: String,

    /// Name of the generated status lookup function
    pub lookup_function: String,

    /// Header directory, relative to the package directory
    pub include_dir: PathBuf,

    /// Header holding status codes
    pub errors_header: String,

    /// Header holding the remaining constants
    pub types_header: String,

    /// Output file, relative to the package directory
    pub output: PathBuf,

    /// External formatter the output is piped through
    pub formatter: FormatterConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prefix: "ZX_".into(),
            class_name: "ZX".into(),
            library: "zircon".into(),
            lookup_function: "getStringForStatus".into(),
            include_dir: PathBuf::from("../../../../zircon/system/public/zircon"),
            errors_header: "errors.h".into(),
            types_header: "types.h".into(),
            output: PathBuf::from("lib/src/constants.dart"),
            formatter: FormatterConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a YAML file
    pub fn load_yaml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce an unusable file
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(Error::Config("prefix must not be empty".into()));
        }
        if self.class_name.is_empty() {
            return Err(Error::Config("class_name must not be empty".into()));
        }
        if self.formatter.program.is_empty() {
            return Err(Error::Config("formatter program must not be empty".into()));
        }
        Ok(())
    }
}

/// External formatter command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Executable, looked up on PATH
    pub program: String,

    /// Extra arguments
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            program: "dartfmt".into(),
            args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.prefix, "ZX_");
        assert_eq!(config.output, PathBuf::from("lib/src/constants.dart"));
        assert_eq!(config.formatter.program, "dartfmt");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GeneratorConfig::from_yaml_str(
            "prefix: FOO_\nformatter:\n  program: dart\n  args: [format, --output=show]\n",
        )
        .unwrap();

        assert_eq!(config.prefix, "FOO_");
        assert_eq!(config.class_name, "ZX");
        assert_eq!(config.formatter.program, "dart");
        assert_eq!(config.formatter.args, vec!["format", "--output=show"]);
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let err = GeneratorConfig::from_yaml_str("prefix: ''\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("zxconst.yaml");
        fs::write(&path, "output: gen/constants.dart\n").unwrap();

        let config = GeneratorConfig::load_yaml(&path).unwrap();
        assert_eq!(config.output, PathBuf::from("gen/constants.dart"));
    }
}
