//! # Noticiero
//!
//! An aggregation-and-notify pipeline for Argentina economy/politics news:
//! fetch from the NewsAPI keyword search and a set of RSS feeds, normalize
//! into a common record shape, filter RSS titles by keyword, deduplicate by
//! exact title, sort newest-first, render an HTML digest, and email it to a
//! fixed recipient list.
//!
//! ## Usage
//!
//! ```sh
//! GMAIL_USER=bot@example.com \
//! GMAIL_APP_PASSWORD=... \
//! DESTINATARIOS=a@example.com,b@example.com \
//! NEWS_API_KEY=... \
//! noticiero --profile combined
//! ```
//!
//! ## Architecture
//!
//! Strictly linear and single-threaded: each source is fetched sequentially
//! and every stage is a single pass over the in-memory record list. A failing
//! query or feed is logged and skipped; only missing credentials and a failed
//! send abort the run with a non-zero exit.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod mailer;
mod models;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use cli::Cli;
use config::{DigestConfig, SourceSpec};
use models::FetchOutcome;
use outputs::html;
use pipeline::{dedupe_by_title, sort_newest_first};
use sources::{feed, newsapi, FetchWindow};
use utils::{display_date, display_datetime, window_label};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();

    let start_time = std::time::Instant::now();
    info!("noticiero starting up");

    let args = Cli::parse();
    let config = match DigestConfig::from_cli(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuración inválida");
            return Err(e);
        }
    };

    let window = FetchWindow::ending_now(config.window_hours);
    info!(
        desde = %window.start.format("%Y-%m-%d"),
        hasta = %window.end.format("%Y-%m-%d"),
        fuentes = config.sources.len(),
        "Buscando noticias"
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    // ---- Fetch all sources sequentially ----
    let mut outcome = FetchOutcome::default();
    for source in &config.sources {
        match source {
            SourceSpec::NewsApi { queries } => {
                // The config guarantees a key whenever this source is enabled.
                let Some(api_key) = config.api_key.as_deref() else {
                    warn!("NewsAPI habilitada sin clave; se omite la fuente");
                    continue;
                };
                outcome.extend(newsapi::fetch(&client, api_key, queries, &window).await);
            }
            SourceSpec::Feed { label, url } => {
                let mut fetched = feed::fetch(&client, label, url, &window).await;
                // Keyword filtering applies to the RSS path only.
                fetched.records = config.rss_filter.apply(fetched.records);
                outcome.extend(fetched);
            }
        }
    }

    // ---- Dedupe and sort ----
    let mut records = dedupe_by_title(outcome.records);
    sort_newest_first(&mut records);
    info!(
        total = records.len(),
        omitidas = outcome.skips.len(),
        "Noticias únicas encontradas"
    );

    // ---- Render and send ----
    // No records ⇒ no document and no send; the run still succeeds.
    let now = Local::now();
    let Some(body) = html::render_digest(
        &records,
        config.top_n,
        &display_datetime(&now),
        &window_label(config.window_hours),
        config.method_note(),
    ) else {
        info!("No se encontraron noticias para enviar");
        return Ok(());
    };
    let subject = format!("📰 Resumen de Noticias - {}", display_date(&now));

    if let Err(e) = mailer::send_digest(&config, &subject, &body).await {
        error!(error = %e, "Error al enviar email");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, noticias = records.len().min(config.top_n), "Execution complete");
    Ok(())
}
