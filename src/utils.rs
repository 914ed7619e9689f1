//! Small display helpers for the digest header and subject line.

use chrono::{DateTime, Local};

/// Format a timestamp the way the digest displays it: `dd/mm/YYYY HH:MM`.
pub fn display_datetime(dt: &DateTime<Local>) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}

/// Format a date for the email subject: `dd/mm/YYYY`.
pub fn display_date(dt: &DateTime<Local>) -> String {
    dt.format("%d/%m/%Y").to_string()
}

/// Human-readable label for the aggregation window.
pub fn window_label(hours: i64) -> String {
    format!("Últimas {hours} horas")
}
