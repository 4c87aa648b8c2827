//! mysql-compat CLI
//!
//! Evaluates registered functions from the command line and prints the
//! function catalog.
//!
//! ```text
//! mysql-compat eval FORMAT 1234567.891 2
//! mysql-compat eval DATE_FORMAT "ts:2024-03-05 14:30:00" "%W %h:%i %p"
//! mysql-compat catalog --json
//! ```

use clap::{Parser, Subcommand};
use mysql_compat::catalog::{generate_catalog_json, generate_function_catalog};
use mysql_compat::{CompatConfig, FieldValue, FunctionContext, SqlError, SqlResult, invoke_function};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "mysql-compat")]
#[command(about = "Evaluate MySQL-dialect scalar functions")]
#[command(version)]
struct Cli {
    /// JSON configuration file (defaults to MYSQL_COMPAT_* environment variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one function call
    ///
    /// Arguments: NULL, true/false, integers, decimals, ts:YYYY-MM-DD HH:MM:SS,
    /// 'quoted text' or bare text.
    Eval {
        /// Function name (case-insensitive)
        function: String,

        /// Literal arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the function catalog
    Catalog {
        /// Emit JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> SqlResult<()> {
    match cli.command {
        Commands::Eval {
            function,
            args,
            json,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let ctx = FunctionContext::new(config);
            let values = args
                .iter()
                .map(|raw| parse_literal(raw))
                .collect::<SqlResult<Vec<_>>>()?;

            log::debug!("Evaluating {} with {} argument(s)", function, values.len());
            let result = invoke_function(&function, &values, &ctx)?;

            if json {
                println!("{}", result.to_json());
            } else {
                println!("{}", result);
            }
        }
        Commands::Catalog { json } => {
            if json {
                println!("{}", generate_catalog_json()?);
            } else {
                print!("{}", generate_function_catalog());
            }
        }
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> SqlResult<CompatConfig> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                SqlError::config_error(path.display().to_string(), e.to_string())
            })?;
            CompatConfig::from_json(&content)
        }
        None => CompatConfig::from_env(),
    }
}

/// Interpret one command-line argument as a SQL literal
fn parse_literal(raw: &str) -> SqlResult<FieldValue> {
    if raw.eq_ignore_ascii_case("null") {
        return Ok(FieldValue::Null);
    }
    if raw.eq_ignore_ascii_case("true") {
        return Ok(FieldValue::Boolean(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(FieldValue::Boolean(false));
    }
    if let Some(ts) = raw.strip_prefix("ts:") {
        return FieldValue::parse_timestamp(ts);
    }
    if let Some(quoted) = raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return Ok(FieldValue::text(quoted));
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(FieldValue::Integer(i));
    }
    if raw.contains('.') && !raw.contains(char::is_whitespace) {
        if let Ok(value) = FieldValue::parse_decimal(raw) {
            return Ok(value);
        }
    }
    Ok(FieldValue::text(raw))
}
