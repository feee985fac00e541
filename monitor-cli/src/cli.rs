use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Text};
use monitor_core::{Collector, Config, SummaryStore, provider_from_config, scheduler};
use std::{path::PathBuf, time::Duration};

use crate::{charts, logging};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-monitor",
    version,
    about = "Periodic weather monitoring with alerts and daily summaries"
)]
pub struct Cli {
    /// Read configuration from this file instead of the platform config dir.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite database holding daily summaries.
    #[arg(long, global = true, value_name = "FILE", default_value = "data/weather_data.db")]
    pub database: PathBuf,

    /// Append-only log file.
    #[arg(long, global = true, value_name = "FILE", default_value = "logs/app.log")]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start with a fresh database and poll forever at the configured interval.
    Run,

    /// Run one collection cycle against the existing database and exit.
    Once,

    /// Render PNG charts from the stored summaries.
    Charts {
        /// Directory the images are written to.
        #[arg(long, default_value = "plots", value_name = "DIR")]
        out_dir: PathBuf,
    },

    /// Interactively set up the API key, cities and alerting.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        logging::init(&self.log_file)?;

        match &self.command {
            Command::Run => {
                let config = self.load_config()?;
                config.validate()?;

                let store = SummaryStore::new(&self.database);
                store.init().context("Failed to initialize the summary database")?;

                let mut collector = self.build_collector(&config, store)?;
                let interval = Duration::from_secs(config.interval_minutes * 60);

                tracing::info!(
                    cities = config.cities.len(),
                    interval_minutes = config.interval_minutes,
                    database = %self.database.display(),
                    "starting monitor"
                );

                scheduler::run(&mut collector, interval).await;
            }
            Command::Once => {
                let config = self.load_config()?;
                config.validate()?;

                let store = SummaryStore::new(&self.database);
                store.ensure().context("Failed to prepare the summary database")?;

                let mut collector = self.build_collector(&config, store)?;
                let report = collector.run_cycle().await;

                println!(
                    "Cycle complete: {}/{} cities fetched, {} alert(s), {} summary row(s) written.",
                    report.fetched, report.cities, report.alerts, report.summaries
                );
                for failure in &report.failures {
                    println!("  {} failed with status {}", failure.city, failure.status);
                }
            }
            Command::Charts { out_dir } => {
                let store = SummaryStore::new(&self.database);
                let rows = store.query_all().context(
                    "Failed to read stored summaries.\n\
                     Hint: run `weather-monitor once` first to collect some data.",
                )?;

                if rows.is_empty() {
                    println!("No summaries stored yet; nothing to chart.");
                    return Ok(());
                }

                for path in charts::render_all(&rows, out_dir)? {
                    println!("Wrote {}", path.display());
                }
            }
            Command::Configure => self.configure()?,
        }

        Ok(())
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    fn build_collector(&self, config: &Config, store: SummaryStore) -> anyhow::Result<Collector> {
        let provider = provider_from_config(config)?;

        Collector::new(config, provider, store)
    }

    fn configure(&self) -> anyhow::Result<()> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => Config::config_file_path()?,
        };

        let mut config = if path.exists() { Config::load_from(&path)? } else { Config::default() };

        let api_key = Password::new("OpenWeatherMap API key:").without_confirmation().prompt()?;
        if !api_key.trim().is_empty() {
            config.api_key = api_key.trim().to_string();
        }

        let cities = Text::new("Cities (comma-separated):")
            .with_default(&config.cities.join(", "))
            .prompt()?;
        config.cities =
            cities.split(',').map(|c| c.trim().to_string()).filter(|c| !c.is_empty()).collect();

        let interval = Text::new("Minutes between cycles:")
            .with_default(&config.interval_minutes.to_string())
            .prompt()?;
        config.interval_minutes =
            interval.trim().parse().context("Interval must be a whole number of minutes")?;

        let threshold = Text::new("Alert threshold (°C):")
            .with_default(&config.alerts.temperature_threshold_c.to_string())
            .prompt()?;
        config.alerts.temperature_threshold_c =
            threshold.trim().parse().context("Threshold must be a number")?;

        let consecutive = Text::new("Consecutive breaches before an alert:")
            .with_default(&config.alerts.consecutive_breaches.to_string())
            .prompt()?;
        config.alerts.consecutive_breaches =
            consecutive.trim().parse().context("Breach count must be a whole number")?;

        config.email.enabled =
            Confirm::new("Send alert emails?").with_default(config.email.enabled).prompt()?;

        if config.email.enabled {
            config.email.smtp_host =
                Text::new("SMTP host:").with_default(&config.email.smtp_host).prompt()?;

            let port =
                Text::new("SMTP port:").with_default(&config.email.smtp_port.to_string()).prompt()?;
            config.email.smtp_port = port.trim().parse().context("Port must be a number")?;

            config.email.sender =
                Text::new("Sender address:").with_default(&config.email.sender).prompt()?;
            config.email.receiver =
                Text::new("Receiver address:").with_default(&config.email.receiver).prompt()?;
            config.email.password =
                Password::new("SMTP password:").without_confirmation().prompt()?;
        }

        config.save_to(&path)?;
        println!("Configuration saved to {}", path.display());

        Ok(())
    }
}
