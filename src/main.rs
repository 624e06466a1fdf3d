use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use lumi_scenarios::sorter::{self, Record, Value};
use lumi_scenarios::utils::config::RunConfig;
use lumi_scenarios::{parser, report, runner};

#[derive(Parser)]
#[command(name = "lumi-scenarios")]
#[command(author = "NL Team")]
#[command(version = "0.1.0")]
#[command(about = "Login scenario tester and record sorting helpers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run login scenarios against a web login form
    Run {
        /// Login page URL
        #[arg(short, long)]
        url: Option<String>,

        /// YAML file with scenarios (built-in list when omitted)
        #[arg(short, long)]
        scenarios: Option<PathBuf>,

        /// Show the browser window
        #[arg(long, default_value = "false")]
        headed: bool,

        /// Wait after submitting the form, in milliseconds
        #[arg(long)]
        settle_ms: Option<u64>,

        /// JSON report destination
        #[arg(short, long, default_value = "test_results.json")]
        output: PathBuf,

        /// Screenshot destination
        #[arg(long, default_value = "test_execution_evidence.png")]
        screenshot: PathBuf,

        /// Also write a JUnit XML report
        #[arg(long)]
        junit: Option<PathBuf>,
    },

    /// Sort a JSON array of records by a field
    Sort {
        /// JSON file containing an array of objects
        input: PathBuf,

        /// Field to sort by
        #[arg(short, long)]
        key: String,

        /// Value used for records missing the key (parsed as JSON, bare text allowed)
        #[arg(short, long, default_value = "0")]
        default: String,

        /// Sort records having the key, then append the rest unsorted
        #[arg(long, conflicts_with = "strict")]
        partitioned: bool,

        /// Fail if any record lacks the key
        #[arg(long)]
        strict: bool,
    },

    /// Render a saved JSON report in another format
    Report {
        /// Path to test_results.json
        results: PathBuf,

        /// Output format (json, junit)
        #[arg(short, long, default_value = "junit")]
        format: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            url,
            scenarios,
            headed,
            settle_ms,
            output,
            screenshot,
            junit,
        } => {
            let defaults = RunConfig::default();
            let config = RunConfig {
                target_url: url.unwrap_or(defaults.target_url),
                settle_delay: settle_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.settle_delay),
                report_path: output,
                screenshot_path: screenshot,
                junit_path: junit,
                headless: defaults.headless && !headed,
                ..defaults
            };

            let specs = match scenarios {
                Some(ref path) => parser::load_scenarios(path)?,
                None => parser::default_scenarios(),
            };

            println!("{} Starting test execution...", "🎬".blue());
            println!("  Target: {}", config.target_url.cyan());
            println!("  Scenarios: {}", specs.len().to_string().yellow());

            if let Err(e) = runner::run_login_suite(&config, &specs).await {
                eprintln!("{} Critical error during setup: {}", "💥".red(), e);
                std::process::exit(2);
            }
        }

        Commands::Sort {
            input,
            key,
            default,
            partitioned,
            strict,
        } => {
            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read file: {}", input.display()))?;
            let records: Vec<Record> = serde_json::from_str(&content)
                .with_context(|| format!("Expected a JSON array of objects: {}", input.display()))?;

            let sorted = if strict {
                sorter::sort_by_key_strict(&records, &key)?
            } else if partitioned {
                sorter::sort_by_key_partitioned(&records, &key)
            } else {
                let default = serde_json::from_str::<Value>(&default)
                    .unwrap_or_else(|_| Value::text(default.as_str()));
                sorter::sort_by_key_with_default(&records, &key, &default)
            };

            println!("{}", serde_json::to_string_pretty(&sorted)?);
        }

        Commands::Report {
            results,
            format,
            output,
        } => {
            report::generate_report(&results, &format, output.as_deref()).await?;
        }
    }

    Ok(())
}
