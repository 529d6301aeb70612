//! fbdialect: Firebird SQL compiler CLI
//!
//! # Usage
//!
//! ```bash
//! # Compile a JSON query description for a 2.5 server
//! fbdialect compile query.json --engine-version 2.5.9
//!
//! # Read from stdin, print JSON
//! cat query.json | fbdialect compile - --format json
//!
//! # Procedure call fragment
//! fbdialect procedure MULTIPLY 3 4
//!
//! # Check what a server version string means
//! fbdialect version "LI-V2.5.9.27139 Firebird 2.5"
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use firebird_dialect::config::{self, DialectConfig};
use firebird_dialect::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fbdialect")]
#[command(version)]
#[command(about = "Compile structured queries into Firebird SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    fbdialect compile query.json --engine-version 2.5.9
    fbdialect procedure GET_ORDERS 42 2024
    fbdialect version 'LI-V4.0.1.2692 Firebird 4.0'")]
struct Cli {
    /// Configuration file (defaults to <config dir>/firebird-dialect/config.toml)
    #[arg(short, long, env = "FBDIALECT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (overrides configuration)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<config::OutputFormat> for Format {
    fn from(format: config::OutputFormat) -> Self {
        match format {
            config::OutputFormat::Text => Format::Text,
            config::OutputFormat::Json => Format::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON query description
    Compile {
        /// File holding the query, or `-` for stdin
        input: String,

        /// Engine version to compile for (vendor string or major.minor.patch)
        #[arg(short, long)]
        engine_version: Option<String>,
    },
    /// Compile a stored procedure call fragment
    Procedure {
        /// Procedure name
        name: String,

        /// Arguments; numbers, true/false and null are typed, the rest are strings
        args: Vec<String>,
    },
    /// Parse a server version string and show the paging syntax it gets
    Version {
        /// The raw version string, e.g. "LI-V3.0.0.33348 Firebird 3.0"
        raw: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("firebird_dialect=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = DialectConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let format = cli.format.unwrap_or_else(|| config.output.into());

    match &cli.command {
        Commands::Compile {
            input,
            engine_version,
        } => {
            let version = match engine_version {
                Some(raw) => Some(raw.parse::<EngineVersion>()?),
                None => config.engine_version()?,
            };
            let paging = version.map(|v| Paging::for_version(&v)).unwrap_or_default();
            tracing::debug!("Compiling with {} paging", paging);

            let text = read_input(input)?;
            let query: Query =
                serde_json::from_str(&text).context("query description is not valid JSON")?;
            let statement = compile(&query, paging)?;
            print_statement(&statement, format)
        }
        Commands::Procedure { name, args } => {
            let args: Vec<Value> = args.iter().map(|a| parse_arg(a)).collect();
            let statement = compile_procedure_call(name, &args)?;
            print_statement(&statement, format)
        }
        Commands::Version { raw } => {
            let version = EngineVersion::parse_server_version(raw)?;
            let paging = Paging::for_version(&version);
            match format {
                Format::Json => println!(
                    "{}",
                    serde_json::json!({
                        "version": version,
                        "legacy_paging": paging.is_legacy(),
                    })
                ),
                Format::Text => {
                    println!("{} {}", "Version:".green().bold(), version.to_string().white());
                    println!("{} {}", "Paging:".green().bold(), paging.to_string().cyan());
                }
            }
            Ok(())
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("reading {}", input))
}

/// Try to type a command-line argument, otherwise keep it as a string.
fn parse_arg(arg: &str) -> Value {
    if let Ok(n) = arg.parse::<i64>() {
        Value::Int(n)
    } else if let Ok(f) = arg.parse::<f64>() {
        Value::Float(f)
    } else if arg == "true" {
        Value::Bool(true)
    } else if arg == "false" {
        Value::Bool(false)
    } else if arg.eq_ignore_ascii_case("null") {
        Value::Null
    } else {
        Value::String(arg.to_string())
    }
}

fn print_statement(statement: &CompiledStatement, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(statement)?);
        }
        Format::Text => {
            println!("{}", "SQL:".green().bold());
            println!("  {}", statement.sql.white());
            if !statement.params.is_empty() {
                println!();
                println!("{}", "Bindings:".cyan());
                for (i, param) in statement.params.iter().enumerate() {
                    println!("  {} = {}", format!("?{}", i + 1).dimmed(), param.to_string().yellow());
                }
            }
        }
    }
    Ok(())
}
