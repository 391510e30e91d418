//! Format the record table and filter options as text or JSON.

use crate::error::{ApiError, StorageError};
use crate::record::Record;
use crate::views::{FilterOptions, FilterState};
use comfy_table::presets::{UTF8_BORDERS_ONLY, UTF8_FULL};
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// Everything needed to render one frame of the table.
pub struct TableFrame<'a> {
    pub rows: &'a [&'a Record],
    pub filters: &'a FilterState,
    pub select_all: bool,
    pub selected: usize,
    pub total: usize,
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// One-line row label used by the interactive pickers
pub fn row_label(record: &Record) -> String {
    format!(
        "{} {} | {} | {} | {}",
        checkbox(record.selected),
        record.name,
        record.company,
        record.status,
        record.id.short()
    )
}

pub fn format_table_text(frame: &TableFrame<'_>) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Team Members"));
    out.push_str(&format!(
        "{} select all    {}/{} selected, {} shown\n",
        checkbox(frame.select_all),
        frame.selected,
        frame.total,
        frame.rows.len()
    ));
    if !frame.filters.is_unrestricted() {
        out.push_str(&format!(
            "Filters: status [{}]  company [{}]\n",
            join_or_all(frame.filters.status.iter()),
            join_or_all(frame.filters.company.iter())
        ));
    }
    out.push('\n');

    if frame.rows.is_empty() {
        if frame.total == 0 {
            out.push_str("No members yet. Add one with `roster add`.\n");
        } else {
            out.push_str("No members match the active filters.\n");
        }
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "", "Name", "Company", "Status", "Last Updated", "Notes", "ID",
    ]);
    for record in frame.rows {
        table.add_row(vec![
            checkbox(record.selected).to_string(),
            record.name.clone(),
            record.company.clone(),
            record.status.clone(),
            record.last_updated.format("%Y-%m-%d").to_string(),
            record.notes.clone(),
            record.id.short(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

fn join_or_all<'a>(values: impl Iterator<Item = &'a String>) -> String {
    let joined = values.map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "all".to_string()
    } else {
        joined
    }
}

pub fn format_table_json(frame: &TableFrame<'_>) -> Result<String, ApiError> {
    let out = json!({
        "select_all": frame.select_all,
        "selected": frame.selected,
        "total": frame.total,
        "visible": frame.rows.len(),
        "filters": frame.filters,
        "records": frame.rows,
    });
    serde_json::to_string_pretty(&out)
        .map_err(|e| ApiError::StorageError(StorageError::Serialization(e)))
}

pub fn format_options_text(options: &FilterOptions) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Filter", "Choices"]);
    table.add_row(vec!["Status".to_string(), options.statuses.join(", ")]);
    table.add_row(vec!["Company".to_string(), options.companies.join(", ")]);
    format!("{}\n", table)
}

pub fn format_options_json(options: &FilterOptions) -> Result<String, ApiError> {
    serde_json::to_string_pretty(options)
        .map_err(|e| ApiError::StorageError(StorageError::Serialization(e)))
}
