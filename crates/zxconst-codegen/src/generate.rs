//! Generation Pipeline
//!
//! Locate headers, extract both of them, render, format, then write. Every
//! failure is fatal and nothing is written unless formatting succeeded.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use zxconst_core::{ConstantSet, Error, GeneratorConfig, HeaderKind, Result};
use zxconst_parser::{read_constants, HeaderLocator};

use crate::dart::DartRenderer;
use crate::format::Formatter;

/// Outcome of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// File that was written or checked
    pub output: PathBuf,
    /// Constants taken from the errors header
    pub errors: usize,
    /// Constants taken from the types header
    pub types: usize,
    /// Whether the file content differs from what was on disk before
    pub changed: bool,
}

/// One-shot Dart constants generator
pub struct Generator {
    config: GeneratorConfig,
    locator: HeaderLocator,
    formatter: Box<dyn Formatter>,
}

impl Generator {
    pub fn new(config: GeneratorConfig, package_dir: &Path, formatter: Box<dyn Formatter>) -> Self {
        let locator = HeaderLocator::new(package_dir, &config);
        Self {
            config,
            locator,
            formatter,
        }
    }

    pub fn locator(&self) -> &HeaderLocator {
        &self.locator
    }

    /// Extract and normalize both headers
    pub fn collect(&self) -> Result<ConstantSet> {
        self.locator.check_inputs()?;

        let mut set = ConstantSet::default();

        for kind in [HeaderKind::Errors, HeaderKind::Types] {
            let constants = read_constants(self.locator.header(kind), &self.config.prefix)?;
            debug!(
                "{}: {} constants with prefix {}",
                kind.as_str(),
                constants.len(),
                self.config.prefix
            );
            match kind {
                HeaderKind::Errors => set.errors = constants,
                HeaderKind::Types => set.types = constants,
            }
        }

        Ok(set)
    }

    /// Produce the formatted file content without touching the disk
    pub fn render(&self) -> Result<(ConstantSet, String)> {
        let set = self.collect()?;
        let source = DartRenderer::new(&self.config).render(&set);
        debug!("Formatting with {}", self.formatter.name());
        let formatted = self.formatter.format(&source)?;
        Ok((set, formatted))
    }

    /// Run the full pipeline and write the output file
    pub fn generate(&self) -> Result<GenerationReport> {
        let (set, content) = self.render()?;
        let output = self.locator.output_path();
        let changed = read_existing(output)?.as_deref() != Some(content.as_str());

        write_atomic(output, |file| file.write_all(content.as_bytes()))?;
        info!("Wrote {} constants to {}", set.len(), output.display());

        Ok(self.report(&set, changed))
    }

    /// Render and compare against the file on disk without writing
    pub fn check(&self) -> Result<GenerationReport> {
        let (set, content) = self.render()?;
        let output = self.locator.output_path();

        if read_existing(output)?.as_deref() != Some(content.as_str()) {
            warn!("{} is out of date", output.display());
            return Err(Error::Stale(output.to_path_buf()));
        }

        Ok(self.report(&set, false))
    }

    fn report(&self, set: &ConstantSet, changed: bool) -> GenerationReport {
        GenerationReport {
            output: self.locator.output_path().to_path_buf(),
            errors: set.errors.len(),
            types: set.types.len(),
            changed,
        }
    }
}

/// Write through a temp file in the same directory, then rename it over
/// `path`. A failed write leaves any previous file untouched.
fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    write(tmp.as_file_mut())?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
