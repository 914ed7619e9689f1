//! Command-line interface definitions for noticiero.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials and the recipient list come from environment variables; the
//! profile and window/limit overrides come from flags.

use clap::{Parser, ValueEnum};

/// Which set of source adapters (and which defaults) a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// NewsAPI keyword search only. Requires `NEWS_API_KEY`.
    Api,
    /// RSS feeds only, with include/exclude keyword filtering.
    Rss,
    /// NewsAPI plus RSS feeds. A missing `NEWS_API_KEY` downgrades to RSS-only.
    Combined,
}

/// Command-line arguments for the noticiero digest run.
///
/// # Examples
///
/// ```sh
/// # Combined run with the default 24-hour window
/// noticiero --profile combined
///
/// # RSS-only, 48 hours, with a custom exclusion list
/// noticiero --profile rss --window-hours 48 --rss-exclude "quiniela,horóscopo"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source profile to run
    #[arg(long, value_enum, default_value_t = Profile::Combined)]
    pub profile: Profile,

    /// Aggregation window in hours (default: 24, or 48 for the rss profile)
    #[arg(long)]
    pub window_hours: Option<i64>,

    /// Maximum number of records in the digest (default: 30, or 25 for the rss profile)
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Comma-separated exclusion phrases for the RSS filter, overriding the
    /// profile default. An empty value disables exclusion entirely.
    #[arg(long)]
    pub rss_exclude: Option<String>,

    /// Sender Gmail address
    #[arg(long, env = "GMAIL_USER")]
    pub gmail_user: Option<String>,

    /// Gmail app password for the sender account
    #[arg(long, env = "GMAIL_APP_PASSWORD", hide_env_values = true)]
    pub gmail_app_password: Option<String>,

    /// Comma-separated recipient list
    #[arg(long, env = "DESTINATARIOS")]
    pub destinatarios: Option<String>,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,
}
