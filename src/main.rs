//! Covid Dashboard CLI
//!
//! Fetches worldwide COVID-19 statistics and renders totals, the country
//! ranking and a two-week trend chart:
//! - Show the worldwide summary
//! - Chart one country
//! - Select countries interactively from stdin
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use covid_dashboard::api::{CovidApiClient, StatsSource};
use covid_dashboard::config::{generate_default_config, Config, LoggingConfig};
use covid_dashboard::dashboard::{Dashboard, SelectOutcome};
use covid_dashboard::view::{render_text, RenderOptions, ViewModel};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "covid-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Worldwide COVID-19 statistics in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Statistics API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Only print the first N ranking rows (overrides config)
    #[arg(short, long, global = true)]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show worldwide totals and the country ranking
    Summary,

    /// Show the summary plus a trend chart for one country
    Country {
        /// Country slug as listed in the ranking (e.g. "spain")
        slug: String,
        /// Also fetch deaths/recovered series
        #[arg(long)]
        details: bool,
    },

    /// Read country slugs from stdin, one per line, and chart each
    Interactive,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(top) = cli.top {
        config.dashboard.top_countries = Some(top);
    }
    if let Commands::Country { details: true, .. } = cli.command {
        config.dashboard.detail_panels = true;
    }

    init_logging(&config.logging);
    tracing::debug!("covid-dashboard v{}", env!("CARGO_PKG_VERSION"));

    let render = RenderOptions {
        top: config.dashboard.top_countries,
        show_details: config.dashboard.detail_panels,
        ..Default::default()
    };

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Summary => {
            let dash = build_dashboard(&config)?;
            let loaded = dash.load_summary().await;
            print_view(&dash, cli.format, &render).await?;
            loaded?;
        }

        Commands::Country { slug, .. } => {
            let dash = build_dashboard(&config)?;
            let result = match dash.load_summary().await {
                Ok(_) => dash.select_country(&slug).await.map(|_| ()),
                Err(e) => Err(e),
            };
            print_view(&dash, cli.format, &render).await?;
            result?;
        }

        Commands::Interactive => {
            let dash = Arc::new(build_dashboard(&config)?);
            run_interactive(dash, cli.format, render).await?;
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("covid_dashboard={}", config.level))
    });

    // stdout carries the dashboard; logs go to stderr
    if config.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn build_dashboard(config: &Config) -> anyhow::Result<Dashboard<CovidApiClient, ViewModel>> {
    let client = CovidApiClient::new(config.api.client_config())
        .context("failed to create HTTP client")?;
    Ok(Dashboard::new(
        client,
        ViewModel::new(),
        config.dashboard.options(),
    ))
}

async fn print_view<S: StatsSource>(
    dash: &Dashboard<S, ViewModel>,
    format: OutputFormat,
    render: &RenderOptions,
) -> anyhow::Result<()> {
    let text = dash
        .with_view(|vm| match format {
            OutputFormat::Table => Ok(render_text(vm, render)),
            OutputFormat::Json => serde_json::to_string_pretty(vm),
        })
        .await?;
    println!("{}", text);
    Ok(())
}

/// Each stdin line is a selection. Selections run concurrently so a line
/// arriving while a request is in flight is ignored, like a second click.
async fn run_interactive(
    dash: Arc<Dashboard<CovidApiClient, ViewModel>>,
    format: OutputFormat,
    render: RenderOptions,
) -> anyhow::Result<()> {
    let loaded = dash.load_summary().await;
    print_view(&dash, format, &render).await?;
    loaded?;

    eprintln!("Enter a country id to chart it, 'r' to refresh, 'q' to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        reap_finished(&mut pending)?;

        match line.trim() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "r" | "refresh" => {
                if let Err(e) = dash.load_summary().await {
                    eprintln!("{}", e);
                }
                print_view(&dash, format, &render).await?;
            }
            input => {
                let input = input.to_string();
                let dash = Arc::clone(&dash);
                let render = render.clone();
                pending.spawn(async move {
                    match dash.select_country(&input).await {
                        Ok(SelectOutcome::Ignored) => {
                            eprintln!("Still loading, ignored '{}'", input);
                            return Ok(());
                        }
                        Ok(SelectOutcome::Rendered { .. }) => {}
                        Err(e) => eprintln!("{}", e),
                    }
                    print_view(&dash, format, &render).await
                });
            }
        }
    }

    while let Some(done) = pending.join_next().await {
        done??;
    }
    Ok(())
}

/// Collect selections that already finished, surfacing their errors
fn reap_finished(pending: &mut JoinSet<anyhow::Result<()>>) -> anyhow::Result<usize> {
    let mut reaped = 0;
    while let Some(done) = pending.try_join_next() {
        done??;
        reaped += 1;
    }
    Ok(reaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_reap_finished_drains_completed_tasks() {
        let mut pending = JoinSet::new();
        for _ in 0..3 {
            pending.spawn(async { Ok(()) });
        }
        pending.spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(reap_finished(&mut pending).unwrap(), 3);
        assert_eq!(pending.len(), 1);
        pending.abort_all();
    }

    #[tokio::test]
    async fn test_reap_finished_surfaces_errors() {
        let mut pending: JoinSet<anyhow::Result<()>> = JoinSet::new();
        pending.spawn(async { Err(anyhow::anyhow!("render failed")) });
        tokio::time::sleep(Duration::from_millis(20)).await;

        let err = reap_finished(&mut pending).unwrap_err();
        assert_eq!(err.to_string(), "render failed");
        assert!(pending.is_empty());
    }
}
