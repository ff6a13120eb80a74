//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined, so a
//! study session can be reviewed in a browser without any server.

use anyhow::Result;
use std::path::Path;

use flashcoach_core::feedback::Feedback;
use flashcoach_core::report::SessionReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// CSS class for a feedback category row.
fn feedback_class(feedback: Feedback) -> &'static str {
    match feedback {
        Feedback::High => "high",
        Feedback::Partial => "partial",
        Feedback::Low => "low",
        Feedback::NoAudio | Feedback::EmptyTranscript => "missing",
    }
}

/// Generate an HTML page from a session report.
pub fn generate_html(report: &SessionReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>flashcoach session — {}</title>\n",
        html_escape(&report.deck.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>flashcoach session</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Deck: <strong>{}</strong> | {} cards | {}</p>\n",
        html_escape(&report.deck.name),
        report.deck.card_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str(
        "<thead><tr><th>Cards</th><th>With audio</th><th>Mean score</th><th>Mean F1</th><th>Mean similarity</th></tr></thead>\n",
    );
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:.1}%</td><td>{:.1}%</td></tr></tbody>\n",
        report.stats.card_count,
        report.stats.cards_with_audio,
        report.stats.mean_score * 100.0,
        report.stats.mean_f1 * 100.0,
        report.stats.mean_similarity * 100.0,
    ));
    html.push_str("</table>\n");
    html.push_str("</section>\n");

    // Per-card results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Cards</h2>\n");
    html.push_str("<table class=\"results-table\">\n");
    html.push_str(
        "<thead><tr><th>Card</th><th>Score</th><th>F1</th><th>Similarity</th><th>Missing</th><th>Feedback</th></tr></thead>\n",
    );
    html.push_str("<tbody>\n");

    for r in &report.results {
        let class = feedback_class(r.feedback);
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{:.1}%</td><td>{:.1}%</td><td>{:.1}%</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&r.id),
            r.score * 100.0,
            r.f1 * 100.0,
            r.similarity * 100.0,
            html_escape(&r.missing_keywords.join(", ")),
            html_escape(r.feedback.as_str()),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>\n");

    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &SessionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
header h1 { margin-bottom: 0.2rem; }
.meta { color: #666; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f5f5f5; }
tr.high td { background: #e8f5e9; }
tr.partial td { background: #fff8e1; }
tr.low td { background: #ffebee; }
tr.missing td { background: #eceff1; color: #666; }
pre { background: #f5f5f5; padding: 1rem; overflow-x: auto; }
"#;
