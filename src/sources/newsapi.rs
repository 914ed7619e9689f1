//! NewsAPI keyword-search fetcher.
//!
//! Issues one request per configured query string against the
//! [`/v2/everything`](https://newsapi.org/docs/endpoints/everything) endpoint
//! and normalizes each returned article. A query that fails (non-success
//! status, network error) is logged and skipped; the remaining queries still
//! run. There are no retries.

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::models::{FetchOutcome, NewsRecord, SkipReason, TIMESTAMP_FORMAT};
use crate::sources::FetchWindow;

const ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Articles requested per query.
const PAGE_SIZE: u32 = 15;

/// The timestamp format NewsAPI uses for `publishedAt`.
const NEWSAPI_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Source name used when the API omits one.
const UNKNOWN_SOURCE: &str = "Desconocida";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

/// One article as returned by the API, before normalization.
#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(default)]
    source: RawSource,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// Run every query against NewsAPI and collect the normalized records.
///
/// Queries run sequentially; each logs a progress line with its item count
/// or the error that made it skip.
#[instrument(level = "info", skip_all, fields(queries = queries.len()))]
pub async fn fetch(
    client: &Client,
    api_key: &str,
    queries: &[String],
    window: &FetchWindow,
) -> FetchOutcome {
    let from = window.start.format("%Y-%m-%d").to_string();
    let to = window.end.format("%Y-%m-%d").to_string();
    let page_size = PAGE_SIZE.to_string();

    let mut outcome = FetchOutcome::default();
    for query in queries {
        let response = client
            .get(ENDPOINT)
            .query(&[
                ("q", query.as_str()),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("language", "es,en"),
                ("sortBy", "publishedAt"),
                ("apiKey", api_key),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!(%query, error = %e, "NewsAPI request failed; skipping query");
                continue;
            }
        };

        if !response.status().is_success() {
            warn!(%query, status = response.status().as_u16(), "NewsAPI returned an error status; skipping query");
            continue;
        }

        let body = match response.json::<SearchResponse>().await {
            Ok(b) => b,
            Err(e) => {
                warn!(%query, error = %e, "NewsAPI response did not parse; skipping query");
                continue;
            }
        };

        let mut kept = 0usize;
        let total = body.articles.len();
        for raw in body.articles {
            match normalize(raw) {
                Ok(record) => {
                    kept += 1;
                    outcome.records.push(record);
                }
                Err(reason) => {
                    debug!(%query, %reason, "Dropped NewsAPI item");
                    outcome.skips.push(reason);
                }
            }
        }
        info!(%query, articles = total, kept, "NewsAPI query done");
    }

    info!(
        records = outcome.records.len(),
        skipped = outcome.skips.len(),
        "NewsAPI fetch complete"
    );
    outcome
}

/// Normalize one raw API article into a [`NewsRecord`].
fn normalize(raw: RawArticle) -> Result<NewsRecord, SkipReason> {
    let title = raw.title.filter(|t| !t.is_empty()).ok_or(SkipReason::MissingTitle)?;
    let link = raw.url.filter(|u| !u.is_empty()).ok_or(SkipReason::MissingLink)?;
    let raw_timestamp = raw
        .published_at
        .ok_or_else(|| SkipReason::BadTimestamp("publishedAt ausente".to_string()))?;
    let published = NaiveDateTime::parse_from_str(&raw_timestamp, NEWSAPI_TIMESTAMP_FORMAT)
        .map_err(|_| SkipReason::BadTimestamp(raw_timestamp))?;

    Ok(NewsRecord {
        title,
        description: raw.description.unwrap_or_default(),
        link,
        published_at: published.format(TIMESTAMP_FORMAT).to_string(),
        source: raw.source.name.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: Option<&str>, url: Option<&str>, published_at: Option<&str>) -> RawArticle {
        RawArticle {
            title: title.map(str::to_string),
            description: None,
            url: url.map(str::to_string),
            published_at: published_at.map(str::to_string),
            source: RawSource::default(),
        }
    }

    #[test]
    fn test_normalize_well_formed_article() {
        let mut article = raw(
            Some("Milei anunció un acuerdo con el FMI"),
            Some("https://example.com/fmi"),
            Some("2024-01-02T10:30:00Z"),
        );
        article.description = Some("Detalles del acuerdo".to_string());
        article.source.name = Some("Reuters".to_string());

        let record = normalize(article).unwrap();
        assert_eq!(record.title, "Milei anunció un acuerdo con el FMI");
        assert_eq!(record.published_at, "2024-01-02 10:30");
        assert_eq!(record.source, "Reuters");
        assert_eq!(record.description, "Detalles del acuerdo");
    }

    #[test]
    fn test_normalize_defaults_missing_source_name() {
        let record = normalize(raw(
            Some("Título"),
            Some("https://example.com"),
            Some("2024-01-02T10:30:00Z"),
        ))
        .unwrap();
        assert_eq!(record.source, "Desconocida");
        assert!(record.description.is_empty());
    }

    #[test]
    fn test_normalize_rejects_missing_title_and_link() {
        assert_eq!(
            normalize(raw(None, Some("https://x"), Some("2024-01-02T10:30:00Z"))),
            Err(SkipReason::MissingTitle)
        );
        assert_eq!(
            normalize(raw(Some(""), Some("https://x"), Some("2024-01-02T10:30:00Z"))),
            Err(SkipReason::MissingTitle)
        );
        assert_eq!(
            normalize(raw(Some("t"), None, Some("2024-01-02T10:30:00Z"))),
            Err(SkipReason::MissingLink)
        );
    }

    #[test]
    fn test_normalize_rejects_bad_timestamp() {
        // Fractional seconds are outside the expected format and must drop.
        let result = normalize(raw(
            Some("t"),
            Some("https://x"),
            Some("2024-01-02T10:30:00.123Z"),
        ));
        assert!(matches!(result, Err(SkipReason::BadTimestamp(_))));

        let result = normalize(raw(Some("t"), Some("https://x"), None));
        assert!(matches!(result, Err(SkipReason::BadTimestamp(_))));
    }

    #[test]
    fn test_response_parses_without_articles_field() {
        let body: SearchResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(body.articles.is_empty());
    }

    #[test]
    fn test_response_parses_newsapi_shape() {
        let body: SearchResponse = serde_json::from_str(
            r#"{
                "status": "ok",
                "totalResults": 1,
                "articles": [{
                    "source": {"id": null, "name": "La Nación"},
                    "title": "El BCRA compró reservas",
                    "description": null,
                    "url": "https://example.com/bcra",
                    "publishedAt": "2024-01-02T12:00:00Z"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(body.articles.len(), 1);
        let record = normalize(body.articles.into_iter().next().unwrap()).unwrap();
        assert_eq!(record.source, "La Nación");
        assert_eq!(record.published_at, "2024-01-02 12:00");
    }
}
