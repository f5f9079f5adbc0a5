//! Rendering primitives for CLI output.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use super::mode::OutputMode;

/// Render rows as a borderless table.
///
/// Pretty mode: dim headers and padded columns.
/// Plain mode: tab-separated values, no header.
pub fn simple_table(mode: OutputMode, headers: &[&str], rows: &[Vec<String>]) -> String {
    if !mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Dim))
            .collect::<Vec<_>>(),
    );
    for i in 0..headers.len() {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
        }
    }
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Render a key-value line: `Key: value` when pretty, `key=value` otherwise.
pub fn kv(mode: OutputMode, key: &str, value: &str) -> String {
    if mode.is_pretty() {
        format!("{}: {}", key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}
