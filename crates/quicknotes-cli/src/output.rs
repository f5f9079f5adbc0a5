//! Output formatting helpers for the CLI.

use quicknotes_core::storage::Note;

use crate::ui::format::{display_text, format_millis, short_id, single_line, truncate};
use crate::ui::{simple_table, OutputMode};

const TABLE_SUMMARY_MAX: usize = 60;

/// Convert a note to JSON for output.
///
/// `content` is unescaped for display (see [`display_text`]); `storedContent`
/// is the exact persisted value.
pub fn note_json(note: &Note) -> serde_json::Value {
    serde_json::json!({
        "id": note.id,
        "content": display_text(&note.content),
        "storedContent": note.content,
        "createdAt": note.created_at,
        "updatedAt": note.updated_at,
        "edited": note.is_edited(),
    })
}

pub fn notes_json(notes: &[Note]) -> Vec<serde_json::Value> {
    notes.iter().map(note_json).collect()
}

/// One-line summary used in list views.
pub fn note_summary(note: &Note, max: usize) -> String {
    truncate(&single_line(&display_text(&note.content)), max)
}

/// Print a list of notes in the resolved mode.
pub fn print_note_list(notes: &[Note], mode: OutputMode, quiet: bool) -> anyhow::Result<()> {
    if mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&notes_json(notes))?);
        return Ok(());
    }
    if notes.is_empty() {
        if !quiet {
            println!("No notes found.");
        }
        return Ok(());
    }

    let pretty = mode.is_pretty();
    let rows: Vec<Vec<String>> = notes
        .iter()
        .map(|note| {
            let id = if pretty {
                short_id(&note.id)
            } else {
                note.id.clone()
            };
            let mut created = format_millis(note.created_at, pretty);
            if pretty && note.is_edited() {
                created.push_str(" (edited)");
            }
            let summary = if pretty {
                note_summary(note, TABLE_SUMMARY_MAX)
            } else {
                single_line(&display_text(&note.content))
            };
            vec![id, created, summary]
        })
        .collect();
    println!("{}", simple_table(mode, &["ID", "CREATED", "NOTE"], &rows));
    Ok(())
}

/// Print a single note with its metadata header.
pub fn print_note(note: &Note, quiet: bool) {
    if !quiet {
        println!("ID: {}", note.id);
        println!("Created: {}", format_millis(note.created_at, true));
        if note.is_edited() {
            println!("Updated: {}", format_millis(note.updated_at, true));
        }
        println!();
    }
    println!("{}", display_text(&note.content));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> Note {
        Note {
            id: "7a2e3c0b-0000-4000-8000-000000000000".to_string(),
            content: "a &lt;b&gt;\nsecond line".to_string(),
            created_at: 1_000,
            updated_at: 2_000,
        }
    }

    #[test]
    fn test_note_json_unescapes_content() {
        let value = note_json(&note());
        assert_eq!(value["content"], "a <b>\nsecond line");
        assert_eq!(value["storedContent"], "a &lt;b&gt;\nsecond line");
        assert_eq!(value["createdAt"], 1_000);
        assert_eq!(value["edited"], true);
    }

    #[test]
    fn test_note_summary_single_line() {
        assert_eq!(note_summary(&note(), 80), "a <b> second line");
        assert_eq!(note_summary(&note(), 8), "a <b>...");
    }
}
