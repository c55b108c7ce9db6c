//! `fieldsplit` — validate delimited field values from the command line.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fieldsplit_core::{Delimiter, EnumCatalog, Splitter, TypeKind, ValidationResult};

/// Split delimited field values and validate each token against a type.
#[derive(Parser)]
#[command(name = "fieldsplit")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a field value read from a file or stdin
    Validate {
        /// Declared type (case-insensitive), e.g. INTEGER or ENUMERATION
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Delimiter name; repeat for several (COMMA, SEMICOLON, SPACE, TABULATOR, NEWLINE)
        #[arg(short, long = "delimiter")]
        delimiters: Vec<String>,

        /// Enum catalog (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        enums: Option<PathBuf>,

        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// List the invalid tokens
        #[arg(long)]
        show_invalid: bool,

        /// Exit with status 1 when any token is invalid
        #[arg(long)]
        strict: bool,
    },

    /// List recognized type names
    Types,

    /// List recognized delimiter names and their patterns
    Delimiters,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct ValidationReport {
    kind: TypeKind,
    delimiters: Vec<String>,
    #[serde(flatten)]
    result: ValidationResult,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_tokens: Option<Vec<String>>,
    checked_at: DateTime<Utc>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Validate {
            kind,
            delimiters,
            enums,
            input,
            format,
            show_invalid,
            strict,
        } => {
            let report = validate_command(
                &kind,
                &delimiters,
                enums.as_deref(),
                input.as_deref(),
                show_invalid,
            )?;
            print_report(&report, format)?;

            if strict && !report.result.is_all_valid() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Types => {
            for kind in TypeKind::ALL {
                println!("{}", kind);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Delimiters => {
            for delimiter in Delimiter::ALL {
                println!("{:<10} {}", delimiter.name(), delimiter.fragment());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn validate_command(
    kind: &str,
    delimiters: &[String],
    enums: Option<&Path>,
    input: Option<&Path>,
    show_invalid: bool,
) -> Result<ValidationReport> {
    let catalog = enums
        .map(|path| {
            EnumCatalog::from_file(path)
                .with_context(|| format!("Failed to load enum catalog {}", path.display()))
        })
        .transpose()?;

    if let (Some(path), Some(catalog)) = (enums, &catalog) {
        if catalog.is_empty() {
            tracing::warn!(
                catalog = %path.display(),
                "Enum catalog has no entries, every token will be invalid"
            );
        }
    }

    let splitter = match &catalog {
        Some(catalog) => Splitter::with_catalog(kind, catalog)?,
        None => Splitter::new(kind, None)?,
    };

    for name in delimiters {
        if Delimiter::from_name(name).is_none() {
            tracing::warn!(delimiter = %name, "Unrecognized delimiter is ignored");
        }
    }

    let text = read_input(input)?;
    let result = splitter.validate(&text, delimiters);
    tracing::info!(
        kind = %splitter.kind(),
        valid = result.valid,
        invalid = result.invalid,
        "Validation finished"
    );

    let invalid_tokens = show_invalid.then(|| {
        splitter
            .invalid_tokens(&text, delimiters)
            .into_iter()
            .map(String::from)
            .collect()
    });

    Ok(ValidationReport {
        kind: splitter.kind(),
        delimiters: delimiters.to_vec(),
        total: result.total(),
        result,
        invalid_tokens,
        checked_at: Utc::now(),
    })
}

/// Read the whole input; a single trailing line break from a file or pipe
/// is not part of the value.
fn read_input(input: Option<&Path>) -> Result<String> {
    let mut text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }

    Ok(text)
}

fn print_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            println!("type:    {}", report.kind);
            println!("valid:   {}", report.result.valid);
            println!("invalid: {}", report.result.invalid);
            if let Some(tokens) = &report.invalid_tokens {
                for token in tokens {
                    println!("  {:?}", token);
                }
            }
        }
    }
    Ok(())
}
