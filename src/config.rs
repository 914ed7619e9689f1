//! Run configuration assembled once at startup.
//!
//! Everything the pipeline needs (credentials, recipients, enabled sources,
//! window, filter policy) lives in an immutable [`DigestConfig`] built from
//! the CLI/environment before any network activity. Missing sender
//! credentials abort here; a missing NewsAPI key is fatal or downgrades the
//! run to RSS-only, depending on the profile.

use std::error::Error;

use tracing::warn;

use crate::cli::{Cli, Profile};
use crate::pipeline::KeywordFilter;

/// Fixed mail host for the sender account.
pub const SMTP_HOST: &str = "smtp.gmail.com";

/// Implicit-TLS SMTP port.
pub const SMTP_PORT: u16 = 465;

/// The keyword queries run against NewsAPI.
const SEARCH_QUERIES: &[&str] = &[
    "Argentina economy",
    "Argentina politics",
    "Argentina peso dollar",
    "Argentina inflation BCRA",
    "Argentina bonds debt",
    "Milei Argentina",
    "Argentina central bank",
    "Argentina IMF",
];

/// The RSS feeds polled in the rss and combined profiles.
const RSS_FEEDS: &[(&str, &str)] = &[
    ("Ámbito Financiero", "https://www.ambito.com/rss/economia.xml"),
    ("El Cronista", "https://www.cronista.com/files/rss/economia.xml"),
    ("Infobae Economía", "https://www.infobae.com/feeds/rss/economia/"),
    ("iProfesional", "https://www.iprofesional.com/rss/economia"),
    ("Perfil Economía", "https://www.perfil.com/feed/economia"),
];

/// Inclusion phrases for the RSS title filter.
const RSS_INCLUDE: &[&str] = &[
    "dólar", "dolar", "inflación", "inflacion", "bcra", "banco central", "milei",
    "peso", "bonos", "deuda", "riesgo país", "fmi", "reservas", "mercado",
];

/// Exclusion phrases used by the rss profile.
const RSS_EXCLUDE: &[&str] = &["dólar blue", "quiniela", "horóscopo"];

/// One enabled source adapter.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    /// NewsAPI keyword search: one request per query string.
    NewsApi { queries: Vec<String> },
    /// A single RSS feed, identified by its human-readable label.
    Feed { label: String, url: String },
}

/// Immutable configuration for one digest run.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Sender Gmail address (also the SMTP username).
    pub sender: String,
    /// Gmail app password.
    pub app_password: String,
    /// Recipient addresses, already split and trimmed.
    pub recipients: Vec<String>,
    /// NewsAPI key, when the profile uses the search API.
    pub api_key: Option<String>,
    /// Aggregation window in hours.
    pub window_hours: i64,
    /// Maximum number of records rendered into the digest.
    pub top_n: usize,
    /// Enabled source adapters, fetched in order.
    pub sources: Vec<SourceSpec>,
    /// Title keyword policy applied to RSS records.
    pub rss_filter: KeywordFilter,
}

impl DigestConfig {
    /// Build the run configuration from parsed CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the sender credentials are missing, when the
    /// recipient list is empty, or when the `api` profile is selected
    /// without a `NEWS_API_KEY`.
    pub fn from_cli(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let sender = match cli.gmail_user.as_deref() {
            Some(user) if !user.is_empty() => user.to_string(),
            _ => return Err("faltan credenciales: GMAIL_USER no está definido".into()),
        };
        let app_password = match cli.gmail_app_password.as_deref() {
            Some(pass) if !pass.is_empty() => pass.to_string(),
            _ => return Err("faltan credenciales: GMAIL_APP_PASSWORD no está definido".into()),
        };

        let recipients = split_list(cli.destinatarios.as_deref().unwrap_or_default());
        if recipients.is_empty() {
            return Err("DESTINATARIOS no contiene ninguna dirección".into());
        }

        let api_key = cli
            .news_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        let mut profile = cli.profile;
        match profile {
            Profile::Api if api_key.is_none() => {
                return Err("falta NEWS_API_KEY (requerida por el perfil api)".into());
            }
            Profile::Combined if api_key.is_none() => {
                warn!("NEWS_API_KEY no está definida; se continúa solo con RSS");
                profile = Profile::Rss;
            }
            _ => {}
        }

        let window_hours = cli.window_hours.unwrap_or(match profile {
            Profile::Rss => 48,
            _ => 24,
        });
        let top_n = cli.top_n.unwrap_or(match profile {
            Profile::Rss => 25,
            _ => 30,
        });

        let mut sources = Vec::new();
        if matches!(profile, Profile::Api | Profile::Combined) {
            sources.push(SourceSpec::NewsApi {
                queries: SEARCH_QUERIES.iter().map(|q| q.to_string()).collect(),
            });
        }
        if matches!(profile, Profile::Rss | Profile::Combined) {
            for (label, url) in RSS_FEEDS {
                sources.push(SourceSpec::Feed {
                    label: label.to_string(),
                    url: url.to_string(),
                });
            }
        }

        // The combined profile historically ran its RSS side without an
        // exclusion list; kept as a per-profile default that --rss-exclude
        // overrides rather than a hard-coded asymmetry.
        let exclude: Vec<String> = match cli.rss_exclude.as_deref() {
            Some(raw) => split_list(raw),
            None => match profile {
                Profile::Rss => RSS_EXCLUDE.iter().map(|s| s.to_string()).collect(),
                _ => Vec::new(),
            },
        };
        let rss_filter = KeywordFilter::new(&exclude, RSS_INCLUDE);

        Ok(Self {
            sender,
            app_password,
            recipients,
            api_key,
            window_hours,
            top_n,
            sources,
            rss_filter,
        })
    }
}

impl DigestConfig {
    /// Footer note naming the kinds of sources this run aggregates.
    pub fn method_note(&self) -> &'static str {
        let has_api = self
            .sources
            .iter()
            .any(|s| matches!(s, SourceSpec::NewsApi { .. }));
        let has_rss = self
            .sources
            .iter()
            .any(|s| matches!(s, SourceSpec::Feed { .. }));
        match (has_api, has_rss) {
            (true, true) => "News API y fuentes RSS",
            (true, false) => "News API",
            _ => "fuentes RSS",
        }
    }
}

/// Split a comma-separated list, trimming whitespace and dropping empties.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli_with(args: &[&str]) -> Cli {
        // Credentials passed as flags so the tests never touch the process env.
        let mut full = vec![
            "noticiero",
            "--gmail-user",
            "bot@example.com",
            "--gmail-app-password",
            "secret",
            "--destinatarios",
            "a@example.com, b@example.com",
        ];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_missing_sender_is_fatal() {
        let cli = Cli::parse_from([
            "noticiero",
            "--gmail-app-password",
            "secret",
            "--destinatarios",
            "a@example.com",
        ]);
        let err = DigestConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("GMAIL_USER"));
    }

    #[test]
    fn test_missing_password_is_fatal() {
        let cli = Cli::parse_from([
            "noticiero",
            "--gmail-user",
            "bot@example.com",
            "--destinatarios",
            "a@example.com",
        ]);
        let err = DigestConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("GMAIL_APP_PASSWORD"));
    }

    #[test]
    fn test_api_profile_requires_key() {
        // An explicitly empty key pins the test against any ambient NEWS_API_KEY.
        let cli = cli_with(&["--profile", "api", "--news-api-key", ""]);
        let err = DigestConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("NEWS_API_KEY"));
    }

    #[test]
    fn test_combined_without_key_downgrades_to_rss() {
        let cli = cli_with(&["--profile", "combined", "--news-api-key", ""]);
        let config = DigestConfig::from_cli(&cli).unwrap();
        assert!(config
            .sources
            .iter()
            .all(|s| matches!(s, SourceSpec::Feed { .. })));
        // Downgraded runs take the rss profile defaults.
        assert_eq!(config.window_hours, 48);
        assert_eq!(config.top_n, 25);
    }

    #[test]
    fn test_combined_with_key_enables_both_source_kinds() {
        let cli = cli_with(&["--profile", "combined", "--news-api-key", "k"]);
        let config = DigestConfig::from_cli(&cli).unwrap();
        assert!(config
            .sources
            .iter()
            .any(|s| matches!(s, SourceSpec::NewsApi { .. })));
        assert!(config
            .sources
            .iter()
            .any(|s| matches!(s, SourceSpec::Feed { .. })));
        assert_eq!(config.window_hours, 24);
        assert_eq!(config.top_n, 30);
        // Combined keeps the looser RSS policy by default.
        assert!(config.rss_filter.exclude.is_empty());
        assert!(!config.rss_filter.include.is_empty());
    }

    #[test]
    fn test_rss_profile_defaults() {
        let cli = cli_with(&["--profile", "rss"]);
        let config = DigestConfig::from_cli(&cli).unwrap();
        assert_eq!(config.window_hours, 48);
        assert_eq!(config.top_n, 25);
        assert!(config.rss_filter.exclude.contains(&"dólar blue".to_string()));
    }

    #[test]
    fn test_rss_exclude_override() {
        let cli = cli_with(&["--profile", "combined", "--rss-exclude", "Quiniela, fútbol"]);
        let config = DigestConfig::from_cli(&cli).unwrap();
        assert_eq!(config.rss_filter.exclude, ["quiniela", "fútbol"]);
    }

    #[test]
    fn test_method_note_follows_enabled_sources() {
        let combined = cli_with(&["--profile", "combined", "--news-api-key", "k"]);
        assert_eq!(
            DigestConfig::from_cli(&combined).unwrap().method_note(),
            "News API y fuentes RSS"
        );

        let api = cli_with(&["--profile", "api", "--news-api-key", "k"]);
        assert_eq!(DigestConfig::from_cli(&api).unwrap().method_note(), "News API");

        let rss = cli_with(&["--profile", "rss"]);
        assert_eq!(DigestConfig::from_cli(&rss).unwrap().method_note(), "fuentes RSS");
    }

    #[test]
    fn test_recipient_list_is_split_and_trimmed() {
        let cli = cli_with(&[]);
        let config = DigestConfig::from_cli(&cli).unwrap();
        assert_eq!(config.recipients, ["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_split_list_drops_empty_entries() {
        assert_eq!(split_list("a@x.com,, b@x.com ,"), ["a@x.com", "b@x.com"]);
        assert!(split_list("").is_empty());
    }
}
