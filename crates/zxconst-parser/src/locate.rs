//! Header Locator
//!
//! Resolves the input headers and the output file from the package directory
//! the generator runs for.

use std::path::{Path, PathBuf};
use tracing::debug;
use zxconst_core::{Error, GeneratorConfig, HeaderKind, Result};

/// Input and output paths for one generation run
#[derive(Debug, Clone)]
pub struct HeaderLocator {
    /// Directory holding the headers
    include_dir: PathBuf,
    errors_header: PathBuf,
    types_header: PathBuf,
    output: PathBuf,
}

impl HeaderLocator {
    /// Resolve paths for `package_dir` using the layout from `config`
    pub fn new(package_dir: &Path, config: &GeneratorConfig) -> Self {
        let include_dir = package_dir.join(&config.include_dir);
        let locator = Self {
            errors_header: include_dir.join(&config.errors_header),
            types_header: include_dir.join(&config.types_header),
            output: package_dir.join(&config.output),
            include_dir,
        };
        debug!("Headers from {:?}, output to {:?}", locator.include_dir, locator.output);
        locator
    }

    pub fn include_dir(&self) -> &Path {
        &self.include_dir
    }

    /// Path of the header for `kind`
    pub fn header(&self, kind: HeaderKind) -> &Path {
        match kind {
            HeaderKind::Errors => &self.errors_header,
            HeaderKind::Types => &self.types_header,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Fail early if either header is missing
    pub fn check_inputs(&self) -> Result<()> {
        for kind in [HeaderKind::Errors, HeaderKind::Types] {
            let path = self.header(kind);
            if !path.is_file() {
                return Err(Error::HeaderNotFound(path.to_path_buf()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("zircon/system/public/zircon")).unwrap();
        fs::create_dir_all(root.join("garnet/public/dart-pkg/zircon")).unwrap();
        fs::write(root.join("zircon/system/public/zircon/errors.h"), "#define ZX_OK 0\n").unwrap();
        fs::write(root.join("zircon/system/public/zircon/types.h"), "#pragma once\n").unwrap();

        temp
    }

    #[test]
    fn test_default_layout() {
        let temp = create_tree();
        let package = temp.path().join("garnet/public/dart-pkg/zircon");
        let locator = HeaderLocator::new(&package, &GeneratorConfig::default());

        assert!(locator.header(HeaderKind::Errors).ends_with("zircon/errors.h"));
        assert!(locator.header(HeaderKind::Types).ends_with("zircon/types.h"));
        assert_eq!(locator.output_path(), package.join("lib/src/constants.dart"));
        assert!(locator.check_inputs().is_ok());
    }

    #[test]
    fn test_missing_header() {
        let temp = create_tree();
        fs::remove_file(temp.path().join("zircon/system/public/zircon/types.h")).unwrap();

        let package = temp.path().join("garnet/public/dart-pkg/zircon");
        let locator = HeaderLocator::new(&package, &GeneratorConfig::default());

        match locator.check_inputs() {
            Err(Error::HeaderNotFound(path)) => assert!(path.ends_with("types.h")),
            other => panic!("expected HeaderNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_layout() {
        let config = GeneratorConfig {
            include_dir: PathBuf::from("include"),
            errors_header: "status.h".into(),
            output: PathBuf::from("out.dart"),
            ..GeneratorConfig::default()
        };
        let locator = HeaderLocator::new(Path::new("/pkg"), &config);

        assert_eq!(locator.include_dir(), Path::new("/pkg/include"));
        assert_eq!(locator.header(HeaderKind::Errors), Path::new("/pkg/include/status.h"));
        assert_eq!(locator.output_path(), Path::new("/pkg/out.dart"));
    }
}
