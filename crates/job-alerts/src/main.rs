//! Job alerts CLI - polls JSearch and emails a daily digest.

use anyhow::{Context, Result};
use chrono::{Local, TimeDelta, Utc};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use job_alerts::config::{
    DEFAULT_API_URL, DEFAULT_LOCATION, DEFAULT_TIMEOUT_SECS, DEFAULT_WINDOW_HOURS,
};
use job_alerts::{AlertConfig, EmailSender, JSearchClient, Notifier, Pipeline};

/// Job alerts CLI - fetch fresh postings and email a digest.
#[derive(Parser)]
#[command(name = "job-alerts")]
#[command(about = "Daily job alert digest from JSearch")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single fetch-and-notify cycle (for cron use)
    Run(RunArgs),

    /// Send a test email to verify SMTP settings
    TestEmail,
}

#[derive(Args)]
pub struct RunArgs {
    /// RapidAPI key for JSearch
    #[arg(long, env = "RAPID_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Search endpoint
    #[arg(long, env = "JSEARCH_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Keyword to search (repeatable; replaces the default list)
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,

    /// Location sent with every query
    #[arg(long, default_value = DEFAULT_LOCATION)]
    location: String,

    /// Maximum posting age in hours
    #[arg(
        long,
        default_value_t = DEFAULT_WINDOW_HOURS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    window_hours: u32,

    /// Per-request timeout for the search API
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Print the digest without sending email
    #[arg(long)]
    dry_run: bool,
}

impl RunArgs {
    fn into_config(self) -> AlertConfig {
        let mut config = AlertConfig::new(self.api_key).with_keywords(self.keywords);
        config.location = self.location;
        config.recency_window = TimeDelta::hours(i64::from(self.window_hours));
        config.api.base_url = self.api_url;
        config.api.timeout = Duration::from_secs(self.timeout_secs);
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("job_alerts=debug,info")
        } else {
            EnvFilter::new("job_alerts=info,warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run(args) => run_alerts(args).await,
        Commands::TestEmail => run_test_email().await,
    }
}

async fn run_alerts(args: RunArgs) -> Result<()> {
    let dry_run = args.dry_run;
    let config = args.into_config();

    tracing::info!(
        keywords = ?config.keywords,
        location = %config.location,
        window_hours = config.recency_window.num_hours(),
        dry_run,
        "Starting job alert run"
    );

    let source =
        JSearchClient::new(config.api.clone()).context("Failed to create search client")?;
    let notifier = if dry_run {
        Notifier::disabled()
    } else {
        Notifier::from_env()
    };

    let pipeline = Pipeline::new(config, Arc::new(source), notifier);
    let mut stdout = std::io::stdout().lock();
    pipeline
        .run(Utc::now(), Local::now().date_naive(), &mut stdout)
        .await
        .context("Job alert run failed")?;

    Ok(())
}

async fn run_test_email() -> Result<()> {
    let sender = EmailSender::from_env().context("Email is not configured")?;

    println!("Sending test email to {}...", sender.recipient());
    sender.send_test().await.context("Failed to send test email")?;
    println!("Test email sent.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_into_config() {
        let cli = Cli::try_parse_from([
            "job-alerts",
            "run",
            "--api-key",
            "abc",
            "-k",
            "Rust Engineer",
            "--keyword",
            "SRE",
            "--window-hours",
            "24",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert!(!args.dry_run);

        let config = args.into_config();
        assert_eq!(config.keywords, vec!["Rust Engineer", "SRE"]);
        assert_eq!(config.location, "United States");
        assert_eq!(config.recency_window, TimeDelta::hours(24));
        assert_eq!(config.api.api_key, "abc");
        assert_eq!(config.api.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_run_defaults_to_all_keywords() {
        let cli =
            Cli::try_parse_from(["job-alerts", "run", "--api-key", "abc", "--dry-run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert!(args.dry_run);
        assert_eq!(args.into_config().keywords.len(), 5);
    }

    #[test]
    fn test_window_hours_rejects_zero_and_negative() {
        for value in ["0", "-5"] {
            let window = format!("--window-hours={value}");
            let result = Cli::try_parse_from([
                "job-alerts",
                "run",
                "--api-key",
                "abc",
                window.as_str(),
            ]);
            assert!(result.is_err(), "window of {value} hours should be rejected");
        }
    }

    #[test]
    fn test_window_hours_rejects_out_of_range() {
        let result = Cli::try_parse_from([
            "job-alerts",
            "run",
            "--api-key",
            "abc",
            "--window-hours",
            "9223372036854775807",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_window_hours_max_does_not_panic() {
        let max = u32::MAX.to_string();
        let cli = Cli::try_parse_from([
            "job-alerts",
            "run",
            "--api-key",
            "abc",
            "--window-hours",
            max.as_str(),
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        let config = args.into_config();
        assert_eq!(config.recency_window.num_hours(), i64::from(u32::MAX));
    }
}
