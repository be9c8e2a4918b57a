//! core::ticket
//!
//! Ticket-identifier grammar and extraction.
//!
//! A ticket identifier is `PREFIX-digits` for a fixed set of tracker project
//! prefixes. Commit messages are scanned for the first identifier only;
//! everything after it in the same message is ignored.

use std::collections::BTreeSet;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TICKET_PATTERN: Regex = Regex::new(r"(LPS|LRQA|LRCI|POSHI)-[0-9]+").unwrap();
}

/// A tracker ticket identifier such as `POSHI-123`.
///
/// Ordering is lexicographic on the full identifier, which is what drives the
/// processing order of the classification loop.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketId(String);

impl TicketId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The project prefix, e.g. `POSHI` for `POSHI-123`.
    pub fn prefix(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Find the first ticket identifier in a commit message.
pub fn extract_first(message: &str) -> Option<TicketId> {
    TICKET_PATTERN
        .find(message)
        .map(|m| TicketId::new(m.as_str()))
}

/// Collect the unique ticket identifiers from a set of commit messages.
///
/// Each message contributes at most its first identifier. Duplicates collapse
/// and the result iterates in lexicographic order.
pub fn extract_all<'a>(messages: impl IntoIterator<Item = &'a str>) -> BTreeSet<TicketId> {
    messages
        .into_iter()
        .filter_map(|message| extract_first(message.trim()))
        .collect()
}
