//! Email renderer
//!
//! Pure mapping from (template, metrics, chart reference) to an HTML
//! document string. No side effects; identical inputs produce
//! byte-identical output, so the caller may re-render on every edit.

use portal_core::models::{EmailTemplate, Metrics};

/// Content-ID under which the chart image is attached to outbound mail.
pub const CHART_CONTENT_ID: &str = "task_chart";

/// How the chart image is referenced from the HTML body.
///
/// Outbound email attaches the PNG and points at it by content-id; the
/// in-browser preview has no attachment and inlines the bytes as a data URI.
#[derive(Debug, Clone, Copy)]
pub enum ChartRef<'a> {
    /// `cid:` reference, with the image attached under the given id.
    ContentId(&'a str),
    /// Inline data URI carrying the base64-encoded PNG payload.
    DataUri(&'a str),
}

impl ChartRef<'_> {
    fn src(&self) -> String {
        match self {
            ChartRef::ContentId(id) => format!("cid:{}", id),
            ChartRef::DataUri(base64_png) => format!("data:image/png;base64,{}", base64_png),
        }
    }
}

/// Render the full HTML email document.
pub fn render_email(template: &EmailTemplate, metrics: &Metrics, chart: Option<ChartRef>) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str(
        "<html>\n<body style=\"font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto;\">\n",
    );
    html.push_str(&format!(
        "<h2 style=\"color: #2c3e50;\">{}</h2>\n",
        escape_html(&template.subject)
    ));
    html.push_str(&paragraphs(&template.greeting));
    html.push_str(&paragraphs(&template.intro));

    html.push_str(
        "<div style=\"background-color: #f8f9fa; padding: 20px; border-radius: 5px; margin: 20px 0;\">\n",
    );
    html.push_str(&format!(
        "<p><strong>Total Tasks:</strong> {}</p>\n",
        metrics.total
    ));
    html.push_str(&format!(
        "<p><strong>Completed:</strong> {} ({:.2}%)</p>\n",
        metrics.completed, metrics.completion_rate
    ));
    html.push_str(&format!(
        "<p><strong>Pending:</strong> {}</p>\n",
        metrics.pending
    ));
    html.push_str(&format!(
        "<p><strong>Past Due:</strong> {}</p>\n",
        metrics.past_due
    ));
    html.push_str("</div>\n");

    html.push_str(&paragraphs(&template.action));

    if let Some(chart) = chart {
        html.push_str(&format!(
            "<img src=\"{}\" style=\"max-width: 100%; height: auto;\">\n",
            chart.src()
        ));
    }

    html.push_str(&format!(
        "<p>{}</p>\n",
        line_breaks(&template.closing)
    ));
    html.push_str("</body>\n</html>\n");

    html
}

/// Split on newlines and wrap each non-empty line in a `<p>` element.
fn paragraphs(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<p>{}</p>\n", escape_html(line)))
        .collect()
}

/// Escape, then preserve embedded newlines as `<br>`.
fn line_breaks(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
