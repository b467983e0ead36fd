use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use logwarden::config::{AnalyzerConfig, Overrides, CONFIG_ENV};

#[derive(Parser)]
#[command(
    name = "logwarden",
    about = "Access-log analyzer for traffic patterns and brute-force login detection",
    version,
    long_about = None
)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an access log and report per-IP traffic and suspicious logins
    Analyze {
        /// Access log to read
        log_file: PathBuf,

        /// Failed logins (HTTP 401) at which an IP is flagged [default: 10]
        #[arg(long, short)]
        threshold: Option<u32>,

        /// CSV output path [default: log_analysis_results.csv]
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Skip writing the CSV file
        #[arg(long)]
        no_csv: bool,

        /// Print the report as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// TOML config file
        #[arg(long, env = CONFIG_ENV)]
        config: Option<PathBuf>,
    },

    /// Show the fields extracted from a single log line
    ParseLine {
        /// Raw log line
        line: String,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Analyze {
            log_file,
            threshold,
            output,
            no_csv,
            json,
            config,
        } => {
            let mut cfg = AnalyzerConfig::resolve(config.as_deref())?;
            cfg.apply_overrides(&Overrides {
                threshold,
                csv_path: output,
                no_csv,
            });
            let report = logwarden::analyze(&log_file, &cfg)?;

            // Tables go out before the export is attempted.
            if json {
                let json_output = serde_json::to_string_pretty(&report)?;
                println!("{}", json_output);
            } else {
                print!("{}", logwarden::report::console::render(&report));
            }

            if let Some(path) = logwarden::export(&report, &cfg)? {
                if !json {
                    println!("\nResults saved to {}", path.display());
                }
            }
            if !json {
                println!();
            }
        }
        Commands::ParseLine { line, json } => {
            let record = logwarden::parser::parse_line(&line);
            if json {
                println!("{}", serde_json::to_string(&record)?);
                return Ok(());
            }
            println!("{:<10} {}", "IP:", display_field(&record.ip));
            println!("{:<10} {}", "Endpoint:", display_field(&record.endpoint));
            if record.status == 0 {
                println!("{:<10} (none)", "Status:");
            } else {
                println!("{:<10} {}", "Status:", record.status);
            }
        }
    }

    Ok(())
}

fn display_field(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}
