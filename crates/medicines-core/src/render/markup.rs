//! HTML and plain-text output for rendered lists.

use super::{ListView, MedicineRow, QualitySummary, RenderedList};

/// Text shown while the list is loading.
pub const LOADING_TEXT: &str = "Loading medicines...";

/// Text shown when the server returned no medicines.
pub const NO_DATA_TEXT: &str = "No medicines available.";

impl RenderedList {
    /// Markup for the list container.
    pub fn to_html(&self) -> String {
        match self {
            RenderedList::Empty => format!("<p class=\"no-data\">{}</p>", NO_DATA_TEXT),
            RenderedList::Rows { rows, summary } => {
                let mut html = String::new();
                for row in rows {
                    html.push_str(&row_html(row));
                    html.push('\n');
                }
                html.push_str(&summary_html(summary));
                html
            }
        }
    }

    /// Terminal rendering, one row per line followed by the report.
    pub fn to_text(&self) -> String {
        match self {
            RenderedList::Empty => format!("{}\n", NO_DATA_TEXT),
            RenderedList::Rows { rows, summary } => {
                let mut text = String::new();
                for row in rows {
                    let icon = if row.has_issues { "⚠" } else { "✓" };
                    text.push_str(&format!("{} {}: {}", icon, row.name.value, row.price.display));
                    if row.has_issues {
                        let issues: Vec<&str> = row.tooltip.lines().skip(1).collect();
                        text.push_str(&format!("  [{}]", issues.join("; ")));
                    }
                    text.push('\n');
                }
                text.push_str(&summary_text(summary));
                text
            }
        }
    }
}

impl ListView {
    pub fn to_html(&self) -> String {
        match self {
            ListView::Loading => format!("<p class=\"loading\">{}</p>", LOADING_TEXT),
            ListView::Loaded(list) => list.to_html(),
            ListView::Failed { message, retry } => {
                let retry_button = if *retry {
                    "\n    <button class=\"retry-btn\">Retry</button>"
                } else {
                    ""
                };
                format!(
                    "<div class=\"error-message\">\n    <p>{}</p>{}\n</div>",
                    escape_html(message),
                    retry_button
                )
            }
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            ListView::Loading => format!("{}\n", LOADING_TEXT),
            ListView::Loaded(list) => list.to_text(),
            ListView::Failed { message, retry } => {
                if *retry {
                    format!("{}\n(type `retry` to try again)\n", message)
                } else {
                    format!("{}\n", message)
                }
            }
        }
    }
}

fn row_html(row: &MedicineRow) -> String {
    let icon = if row.has_issues {
        "<span class=\"data-warning\">⚠️</span>"
    } else {
        "<span class=\"data-clean-icon\">✓</span>"
    };

    let actions = match &row.key {
        Some(key) => {
            let key = escape_html(key);
            format!(
                " <button class=\"edit-btn\" data-name=\"{key}\">Edit</button>\
                 <button class=\"delete-btn\" data-name=\"{key}\">Delete</button>"
            )
        }
        None => String::new(),
    };

    format!(
        "<div class=\"medicine-item {} {}\" title=\"{}\"><strong class=\"medicine-name\">{}</strong>: \
         <span class=\"medicine-price\">{}</span> {}{}</div>",
        row.price.severity.css_class(),
        row.quality_class(),
        escape_html(&row.tooltip),
        escape_html(&row.name.value),
        escape_html(&row.price.display),
        icon,
        actions
    )
}

fn summary_html(summary: &QualitySummary) -> String {
    let mut html = String::from("<div class=\"data-quality-summary\">");
    html.push_str("<p><strong>Data Quality Report:</strong></p>");
    html.push_str(&format!(
        "<p>Total medicines: {} | Valid: {} ({}%)</p>",
        summary.total, summary.valid, summary.percentage
    ));
    if summary.duplicate_names > 0 {
        html.push_str(&format!(
            "<p class=\"warning\">⚠️ Found {} duplicate medicine names</p>",
            summary.duplicate_names
        ));
    }
    if summary.skipped > 0 {
        html.push_str(&format!(
            "<p class=\"warning\">⚠️ Skipped {} malformed entries</p>",
            summary.skipped
        ));
    }
    html.push_str("</div>");
    html
}

fn summary_text(summary: &QualitySummary) -> String {
    let mut text = String::from("Data Quality Report:\n");
    text.push_str(&format!(
        "Total medicines: {} | Valid: {} ({}%)\n",
        summary.total, summary.valid, summary.percentage
    ));
    if summary.duplicate_names > 0 {
        text.push_str(&format!(
            "⚠ Found {} duplicate medicine names\n",
            summary.duplicate_names
        ));
    }
    if summary.skipped > 0 {
        text.push_str(&format!("⚠ Skipped {} malformed entries\n", summary.skipped));
    }
    text
}

/// Escape a string for HTML text and attribute positions.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
