//! Ignore-rule predicates

use regex::Regex;

/// A predicate over table names or documentation strings
///
/// The projector only asks "does this text match", so any pattern engine or a
/// plain closure can stand in for the configured regular expressions.
pub trait CommentFilter {
    fn is_match(&self, text: &str) -> bool;
}

impl CommentFilter for Regex {
    fn is_match(&self, text: &str) -> bool {
        Regex::is_match(self, text)
    }
}

impl<F> CommentFilter for F
where
    F: Fn(&str) -> bool,
{
    fn is_match(&self, text: &str) -> bool {
        self(text)
    }
}
