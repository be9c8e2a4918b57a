//! core::groups
//!
//! Ticket classification into named changelog groups.
//!
//! # Design
//!
//! A group is a named bucket of formatted ticket lines. Groups render in
//! lexicographic name order, so the accumulation structure is a `BTreeMap`;
//! lines within a group keep their append order (which is the lexicographic
//! ticket-processing order of the caller's loop).
//!
//! Classification depends on the ticket's project prefix:
//!
//! - `LRCI` / `LRQA` tickets group by their first `poshi_`-namespaced label,
//!   transformed into a display name. A ticket without such a label goes to
//!   [`OTHER_GROUP`] after a warning.
//! - `POSHI` tickets group by their first component, with one exception: if
//!   the first component is the sentinel [`SENTINEL_COMPONENT`], the ticket is
//!   left ungrouped. Later components are never consulted; first in iteration
//!   order wins. A ticket with no components is also left ungrouped, after a
//!   warning.
//! - Any other prefix goes to [`OTHER_GROUP`].

use std::collections::BTreeMap;

use super::ticket::TicketId;

/// Group for tickets that fit nowhere else.
pub const OTHER_GROUP: &str = "Other";

/// Component name that excludes a `POSHI` ticket from grouping.
pub const SENTINEL_COMPONENT: &str = "Release";

/// Label namespace consulted for `LRCI`/`LRQA` tickets.
pub const LABEL_NAMESPACE: &str = "poshi_";

/// Ordered mapping from group name to formatted ticket lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketGroups {
    groups: BTreeMap<String, Vec<String>>,
}

impl TicketGroups {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to a group, creating the group if absent.
    pub fn add(&mut self, group: impl Into<String>, line: impl Into<String>) {
        self.groups.entry(group.into()).or_default().push(line.into());
    }

    /// Iterate groups in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, lines)| (name.as_str(), lines.as_slice()))
    }

    /// Whether no ticket was grouped.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

/// Outcome of classifying one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// File the ticket's line under this group.
    Grouped(String),
    /// `LRCI`/`LRQA` ticket without a namespaced label: warn, then file
    /// under [`OTHER_GROUP`].
    MissingLabel,
    /// `POSHI` ticket without components: warn, leave ungrouped.
    MissingComponent,
    /// `POSHI` ticket whose first component is the sentinel: leave ungrouped
    /// silently.
    SentinelComponent,
}

/// Classify a ticket from its tracker metadata.
pub fn classify(ticket: &TicketId, labels: &[String], components: &[String]) -> Classification {
    match ticket.prefix() {
        "LRCI" | "LRQA" => labels
            .iter()
            .find(|label| label.starts_with(LABEL_NAMESPACE))
            .map(|label| Classification::Grouped(label_group_name(label)))
            .unwrap_or(Classification::MissingLabel),
        "POSHI" => match components.first() {
            None => Classification::MissingComponent,
            Some(name) if name == SENTINEL_COMPONENT => Classification::SentinelComponent,
            Some(name) => Classification::Grouped(name.clone()),
        },
        _ => Classification::Grouped(OTHER_GROUP.to_string()),
    }
}

/// Turn a namespaced label into a group display name.
///
/// `poshi_test_case` becomes `Test Case`: underscores turn into spaces, each
/// word is title-cased, the leading `Poshi ` is stripped, and the one label
/// that is an acronym (`poshi_pql`) is upper-cased to `PQL`.
fn label_group_name(label: &str) -> String {
    let spaced = label.replace('_', " ");
    let name = upper_case_each_word(&spaced).replace("Poshi ", "");

    if name == "Pql" {
        name.to_uppercase()
    } else {
        name
    }
}

/// Upper-case the first letter of each space-separated word.
fn upper_case_each_word(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for ch in s.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch == ' ';
    }

    out
}
