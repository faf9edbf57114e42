use crate::domain::model::{BmiHistoryEntry, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use comfy_table::{presets::UTF8_FULL, Table};

pub const EMPTY_HISTORY_MESSAGE: &str = "No history available.";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `2024-03-09T14:05:30` -> `2024-03-09 14:05:30`. Unparseable values are shown as received.
pub fn format_created_at(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|ts| ts.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn render_history(entries: &[BmiHistoryEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_HISTORY_MESSAGE.to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Height (m)", "Weight (kg)", "BMI", "Date"]);
    for entry in entries {
        table.add_row(vec![
            entry.height.to_string(),
            entry.weight.to_string(),
            format!("{:.2}", entry.bmi),
            format_created_at(&entry.created_at),
        ]);
    }
    table.to_string()
}
