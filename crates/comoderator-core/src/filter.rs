//! Question classification.

use comoderator_protocols::ChatEntry;

/// Decides whether a chat entry needs an answer. Must be a pure predicate.
pub trait QuestionFilter: Send + Sync {
    fn is_question(&self, entry: &ChatEntry) -> bool;
}

/// Any non-empty text containing a literal `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionMarkFilter;

impl QuestionFilter for QuestionMarkFilter {
    fn is_question(&self, entry: &ChatEntry) -> bool {
        !entry.text.is_empty() && entry.text.contains('?')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(t: &str) -> ChatEntry {
        ChatEntry::new("Alice", t, "10:00")
    }

    #[test]
    fn test_question_mark_filter() {
        let filter = QuestionMarkFilter;
        assert!(filter.is_question(&text("What time is it?")));
        assert!(filter.is_question(&text("?")));
        assert!(filter.is_question(&text("is this on? hello")));
        assert!(!filter.is_question(&text("Thanks everyone")));
        assert!(!filter.is_question(&text("")));
    }

    #[test]
    fn test_filter_ignores_sender() {
        let entry = ChatEntry::new("Who?", "hello", "10:00");
        assert!(!QuestionMarkFilter.is_question(&entry));
    }
}
