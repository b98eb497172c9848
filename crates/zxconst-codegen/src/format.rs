//! External Formatter Integration
//!
//! Generated text is piped through a formatter (`dartfmt` by default) before it
//! is written. A missing or failing formatter aborts the run.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;
use zxconst_core::FormatterConfig;

/// Errors that can occur while formatting
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Formatter not found: {0}. Please install it or configure another formatter.")]
    NotFound(String),

    #[error("Formatting failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<FormatError> for zxconst_core::Error {
    fn from(err: FormatError) -> Self {
        zxconst_core::Error::Format(err.to_string())
    }
}

/// Turns generated source into its canonical formatting
pub trait Formatter {
    /// Format `source`, returning the formatted text
    fn format(&self, source: &str) -> Result<String, FormatError>;

    /// Formatter name, for logs
    fn name(&self) -> &str;
}

/// Formatter backed by a child process reading stdin and writing stdout
#[derive(Debug, Clone)]
pub struct ExternalFormatter {
    program: String,
    args: Vec<String>,
}

impl ExternalFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &FormatterConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }
}

impl Formatter for ExternalFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        debug!("Formatting {} bytes with {} {:?}", source.len(), self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FormatError::NotFound(self.program.clone()),
                _ => FormatError::IoError(e),
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| FormatError::Failed("formatter stdin unavailable".into()))?;

        // Feed stdin from another thread so a formatter that streams output
        // cannot fill its stdout pipe while we are still writing.
        let input = source.as_bytes();
        let (written, output) = std::thread::scope(|s| {
            let writer = s.spawn(move || stdin.write_all(input));
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatError::Failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        written.map_err(|_| FormatError::Failed("stdin writer panicked".into()))??;

        String::from_utf8(output.stdout)
            .map_err(|e| FormatError::Failed(format!("non UTF-8 output: {}", e)))
    }

    fn name(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program() {
        let formatter = ExternalFormatter::new("zxconst-no-such-formatter", vec![]);
        let err = formatter.format("part of zircon;\n").unwrap_err();
        assert!(matches!(err, FormatError::NotFound(ref p) if p == "zxconst-no-such-formatter"));
    }

    #[cfg(unix)]
    #[test]
    fn test_passes_text_through_child() {
        let formatter = ExternalFormatter::new("cat", vec![]);
        let out = formatter.format("abstract class ZX {}\n").unwrap();
        assert_eq!(out, "abstract class ZX {}\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_large_input() {
        let formatter = ExternalFormatter::new("cat", vec![]);
        let source = "  static const int OK = 0;\n".repeat(20_000);
        assert_eq!(formatter.format(&source).unwrap(), source);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program() {
        let formatter = ExternalFormatter::new("sh", vec!["-c".into(), "echo bad >&2; exit 3".into()]);
        match formatter.format("x") {
            Err(FormatError::Failed(msg)) => assert!(msg.contains("bad")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_from_config() {
        let formatter = ExternalFormatter::from_config(&FormatterConfig::default());
        assert_eq!(formatter.name(), "dartfmt");
    }
}
