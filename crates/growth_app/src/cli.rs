//! Command-line arguments for the growth client.

use std::time::Duration;

use clap::{Parser, Subcommand};
use growth_engine::{ClientSettings, PollSettings};
use log::LevelFilter;

use crate::platform::logging::LogDestination;

/// Submit product URLs to the growth backend and follow the analysis.
#[derive(Parser, Debug, Clone)]
#[command(name = "growth", version)]
pub struct Args {
    /// Base URL of the analysis API (overrides GROWTH_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Seconds between status polls
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,

    /// Per-request timeout in seconds; unset keeps the transport default
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the final job as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start an analysis for a product URL and follow it to completion
    Analyze {
        /// Product page to analyze
        product_url: String,
    },
    /// Follow an existing job by id
    Watch {
        /// Job id returned by an earlier submission
        job_id: String,
    },
}

impl Args {
    pub fn client_settings(&self) -> ClientSettings {
        let mut settings = ClientSettings::from_env();
        if let Some(api_url) = &self.api_url {
            settings.base_url = api_url.clone();
        }
        settings.request_timeout = self.timeout_secs.map(Duration::from_secs);
        settings
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            period: Duration::from_secs(self.interval_secs),
        }
    }

    pub fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
