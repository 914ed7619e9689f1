//! HTML digest renderer.
//!
//! Produces the email body: a header with the generation date and window
//! label, one block per record (at most the configured top-N), and a footer
//! noting how the digest was generated. Titles, descriptions and links are
//! rendered verbatim. An empty record list produces no document at all, so
//! there is nothing to send.

use std::fmt::Write;

use crate::models::NewsRecord;

/// Render the digest body from the top `top_n` records.
///
/// Returns `None` when there are no records: no document is produced and
/// the caller has nothing to send.
///
/// # Arguments
///
/// * `records` - Already filtered, deduplicated, and sorted newest-first
/// * `top_n` - Maximum number of record blocks to render
/// * `generated_at` - Display timestamp for the header (`dd/mm/YYYY HH:MM`)
/// * `window_label` - Header line describing the window (e.g. "Últimas 24 horas")
/// * `method_note` - Footer note naming the sources (e.g. "News API y fuentes RSS")
pub fn render_digest(
    records: &[NewsRecord],
    top_n: usize,
    generated_at: &str,
    window_label: &str,
    method_note: &str,
) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<html>
<body style="font-family: Arial, sans-serif;">
    <h2>📰 Resumen de Noticias - Argentina &amp; Mercados</h2>
    <p><strong>Fecha:</strong> {generated_at}</p>
    <p><strong>Período:</strong> {window_label}</p>
    <hr>
"#
    );

    for (i, record) in records.iter().take(top_n).enumerate() {
        let _ = write!(
            body,
            r#"    <p>
        <strong>{number}. [{published}]</strong> {title}<br>
"#,
            number = i + 1,
            published = record.published_at,
            title = record.title,
        );
        if !record.description.is_empty() {
            let _ = writeln!(body, "        <em>{}</em><br>", record.description);
        }
        let _ = write!(
            body,
            r#"        <small>Fuente: {source}</small><br>
        <a href="{link}" target="_blank">Leer más →</a>
    </p>
"#,
            source = record.source,
            link = record.link,
        );
    }

    let _ = write!(
        body,
        r#"    <hr>
    <p><small>Este resumen fue generado automáticamente usando {method_note}.</small></p>
</body>
</html>
"#
    );
    Some(body)
}
