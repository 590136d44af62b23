//! Volcano CLI
//!
//! Command-line interface for Volcano operations:
//! - Render the dashboard to a static HTML file
//! - Print the derived chart series
//! - Validate a summary document
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use volcano::config::{generate_default_config, Config};
use volcano::dashboard::{
    business_type_series, customer_type_series, render_page, ChartSlice, DashboardState,
};
use volcano::summary::{validate, Severity, Summary, SummaryLoader};

#[derive(Parser)]
#[command(name = "volcano-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Customer analytics dashboard tools")]
#[command(long_about = "Volcano renders a customer analytics dashboard from a pre-computed JSON summary.\nRender it offline, inspect the derived series, or check the data file.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Summary source, file path or URL (overrides config)
    #[arg(short, long, global = true)]
    pub data: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard page to HTML
    Render {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the derived pie chart series
    Series,

    /// Check the summary document for inconsistencies
    Validate,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct SeriesOutput {
    customer_types: Vec<ChartSlice>,
    business_types: Vec<ChartSlice>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(data) = &cli.data {
        config.data.source = data.clone();
    }

    init_stderr_logging(&config.logging.level);

    match cli.command {
        Commands::Render { output } => {
            let summary = load_summary(&config).await?;

            let mut state = DashboardState::default();
            state.publish(summary);
            let html = render_page(&state, &config.dashboard)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Dashboard written to {}", path.display());
                }
                None => println!("{}", html),
            }
        }

        Commands::Series => {
            let summary = load_summary(&config).await?;
            let series = SeriesOutput {
                customer_types: customer_type_series(&summary),
                business_types: business_type_series(&summary),
            };

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&series)?),
                _ => {
                    print_series("客户类型分布", &series.customer_types);
                    println!();
                    print_series("业务类型分布", &series.business_types);
                }
            }
        }

        Commands::Validate => {
            let summary = load_summary(&config).await?;
            let report = validate(&summary);

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                _ => {
                    if report.issues.is_empty() {
                        println!("OK: {} is consistent", config.data.source);
                    }
                    for issue in &report.issues {
                        let tag = match issue.severity() {
                            Severity::Error => "error",
                            Severity::Warning => "warning",
                        };
                        println!("{:<8} {}", tag, issue);
                    }
                }
            }

            if !report.is_valid() {
                std::process::exit(1);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Load the configured summary once
async fn load_summary(config: &Config) -> anyhow::Result<Summary> {
    let source = config.data.summary_source();
    let loader = SummaryLoader::new(source.clone(), config.data.loader_config())?;

    loader
        .load()
        .await
        .with_context(|| format!("loading summary from {}", source))
}

/// Logs go to stderr so stdout stays clean for rendered output
fn init_stderr_logging(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("volcano={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_series(title: &str, slices: &[ChartSlice]) {
    println!("{}", title);
    println!("{}", "-".repeat(36));

    if slices.is_empty() {
        println!("No data");
        return;
    }

    for slice in slices {
        println!("{:<16} {:>8} {:>8}%", slice.label, slice.value, slice.percentage);
    }
}
