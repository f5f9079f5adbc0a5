//! Input and parsing helper functions for the CLI.

use std::io::{self, IsTerminal, Read};

use quicknotes_core::storage::Note;

/// Use the given content, or read it from piped stdin.
pub fn read_content(arg: Option<String>) -> anyhow::Result<String> {
    if let Some(content) = arg {
        return Ok(content);
    }
    if io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "No content provided. Pass it as an argument or pipe it on stdin."
        ));
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(buffer)
}

/// Resolve a full id or a unique id prefix against the given notes.
pub fn resolve_note_id(notes: &[Note], id_or_prefix: &str) -> anyhow::Result<String> {
    let needle = id_or_prefix.trim();
    if needle.is_empty() {
        return Err(anyhow::anyhow!("Note ID cannot be empty"));
    }
    if let Some(note) = notes.iter().find(|note| note.id == needle) {
        return Ok(note.id.clone());
    }

    let matches: Vec<&Note> = notes
        .iter()
        .filter(|note| note.id.starts_with(needle))
        .collect();
    match matches.as_slice() {
        [] => Err(anyhow::anyhow!("Note not found: {}", needle)),
        [note] => Ok(note.id.clone()),
        _ => Err(anyhow::anyhow!(
            "Ambiguous note ID prefix {} ({} matches). Use more characters.",
            needle,
            matches.len()
        )),
    }
}

/// Output format for list/search commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

/// Parse output format string.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(anyhow::anyhow!(
            "Unsupported format: {} (use table or plain)",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            content: "c".to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_resolve_full_id() {
        let notes = vec![note("abc123"), note("abc999")];
        assert_eq!(resolve_note_id(&notes, "abc123").unwrap(), "abc123");
    }

    #[test]
    fn test_resolve_unique_prefix() {
        let notes = vec![note("abc123"), note("def456")];
        assert_eq!(resolve_note_id(&notes, "de").unwrap(), "def456");
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let notes = vec![note("abc123"), note("abc999")];
        let err = resolve_note_id(&notes, "abc").unwrap_err();
        assert!(err.to_string().contains("Ambiguous"));
    }

    #[test]
    fn test_resolve_missing() {
        let notes = vec![note("abc123")];
        let err = resolve_note_id(&notes, "zzz").unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(resolve_note_id(&notes, "  ").is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(None).unwrap(), None);
        assert_eq!(
            parse_output_format(Some("table")).unwrap(),
            Some(OutputFormat::Table)
        );
        assert!(parse_output_format(Some("csv")).is_err());
    }
}
