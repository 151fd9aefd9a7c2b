use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::translations::Summary;

const UNKNOWN_DATE: &str = "Unknown";

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right(value: String) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

/// `YYYY-MM-DD` in the timestamp's own offset, or `Unknown`.
pub fn format_day(value: Option<OffsetDateTime>) -> String {
    let format = format_description!("[year]-[month]-[day]");
    value
        .and_then(|value| value.format(&format).ok())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// Counts and percentages for the whole audit.
pub fn summary_table(summary: &Summary) -> Table {
    let mut table = new_table(vec!["Metric", "Count", "Percentage"]);
    table.add_row(vec![
        Cell::new("Files analyzed"),
        right(summary.files_analyzed().to_string()),
        right("100%".to_string()),
    ]);
    for (label, count, share) in [
        (
            "Translated",
            summary.files_translated(),
            summary.percentage_translated(),
        ),
        ("Missing", summary.files_missing(), summary.percentage_missing()),
        (
            "Outdated",
            summary.files_outdated(),
            summary.percentage_outdated(),
        ),
    ] {
        table.add_row(vec![
            Cell::new(label),
            right(count.to_string()),
            right(format!("{share:.1}%")),
        ]);
    }
    table
}

/// First `limit` untranslated files, or `None` when there are none.
pub fn missing_table(summary: &Summary, limit: usize) -> Option<Table> {
    let missing = summary.first_missing(limit);
    if missing.is_empty() {
        return None;
    }
    let mut table = new_table(vec!["File", "Status"]);
    for document in missing {
        table.add_row(vec![
            Cell::new(document.file_name()),
            Cell::new(document.status().label()),
        ]);
    }
    Some(table)
}

/// First `limit` outdated translations, or `None` when there are none.
pub fn outdated_table(summary: &Summary, limit: usize) -> Option<Table> {
    let outdated = summary.first_outdated(limit);
    if outdated.is_empty() {
        return None;
    }
    let mut table = new_table(vec!["File", "Source Date", "Translation Date", "Status"]);
    for document in outdated {
        table.add_row(vec![
            Cell::new(document.file_name()),
            Cell::new(format_day(document.source_changed_at)),
            Cell::new(format_day(document.translation_changed_at)),
            Cell::new(document.status().label()),
        ]);
    }
    Some(table)
}

/// Full console report: summary followed by the non-empty Top-N tables.
pub fn render_console(summary: &Summary, limit: usize) -> String {
    let mut out = format!(
        "Translation status for '{}' in {}\n{}\n",
        summary.target_language(),
        summary.repository(),
        summary_table(summary)
    );
    if let Some(table) = missing_table(summary, limit) {
        let shown = summary.first_missing(limit).len();
        out.push_str(&format!("\nTop {shown} Missing Translations\n{table}\n"));
    }
    if let Some(table) = outdated_table(summary, limit) {
        let shown = summary.first_outdated(limit).len();
        out.push_str(&format!("\nTop {shown} Outdated Translations\n{table}\n"));
    }
    out
}
