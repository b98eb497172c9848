//! zxconst CLI
//!
//! Regenerates the Dart Zircon constants file. With no arguments it runs from
//! the current directory using the default package layout.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zxconst_codegen::{ExternalFormatter, Generator};
use zxconst_core::{FormatterConfig, GeneratorConfig};

#[derive(Parser)]
#[command(name = "zxconst")]
#[command(author, version, about = "Generate Dart constants from Zircon headers", long_about = None)]
struct Cli {
    /// Package directory the header and output paths are relative to
    #[arg(long, value_name = "DIR")]
    package_dir: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file, relative to the package directory
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Formatter command line (default: dartfmt)
    #[arg(long, value_name = "CMD")]
    formatter: Option<String>,

    /// Verify the output file is up to date instead of writing it
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let package_dir = match cli.package_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    debug!("Package directory: {}", package_dir.display());

    let formatter = ExternalFormatter::from_config(&config.formatter);
    let generator = Generator::new(config, &package_dir, Box::new(formatter));

    if cli.check {
        let report = generator.check()?;
        println!("{} is up to date", report.output.display());
    } else {
        let report = generator.generate()?;
        println!(
            "Wrote {} ({} status codes, {} other constants{})",
            report.output.display(),
            report.errors,
            report.types,
            if report.changed { "" } else { ", unchanged" }
        );
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load_yaml(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(command) = &cli.formatter {
        config.formatter = parse_formatter(command)?;
    }

    config.validate()?;
    debug!("Using config: {:?}", config);
    Ok(config)
}

fn parse_formatter(command: &str) -> Result<FormatterConfig> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let Some(program) = parts.next() else {
        bail!("--formatter must name a program");
    };
    Ok(FormatterConfig {
        program,
        args: parts.collect(),
    })
}
