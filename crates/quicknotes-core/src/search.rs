//! Case-insensitive substring search over notes held in memory.

use crate::storage::Note;

/// Return the notes whose content contains `term`, ignoring case.
///
/// A blank term is no filter: all notes come back in their original order.
pub fn filter_by_search(notes: &[Note], term: &str) -> Vec<Note> {
    let term = term.trim();
    if term.is_empty() {
        return notes.to_vec();
    }

    let needle = term.to_lowercase();
    notes
        .iter()
        .filter(|note| note.content.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, content: &str) -> Note {
        Note {
            id: id.to_string(),
            content: content.to_string(),
            created_at: 1,
            updated_at: 1,
        }
    }

    fn sample() -> Vec<Note> {
        vec![
            note("1", "Buy milk"),
            note("2", "Call the DENTIST"),
            note("3", "dentist invoice paid"),
        ]
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let notes = sample();
        assert_eq!(filter_by_search(&notes, ""), notes);
        assert_eq!(filter_by_search(&notes, "   "), notes);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let notes = sample();
        let found = filter_by_search(&notes, "Dentist");
        let ids: Vec<&str> = found.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_term_is_trimmed() {
        let notes = sample();
        let found = filter_by_search(&notes, "  milk  ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_no_match_returns_empty() {
        let notes = sample();
        assert!(filter_by_search(&notes, "xyz").is_empty());
    }
}
