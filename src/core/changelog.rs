//! core::changelog
//!
//! Fragment insertion into the changelog text.
//!
//! The new section is inserted directly after the title line by replacing the
//! first occurrence of the title with the rendered fragment (which itself
//! starts with the title). All prior content shifts down unchanged.

use thiserror::Error;

use super::render::CHANGELOG_TITLE;

/// Errors from changelog rewriting.
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The changelog does not contain the expected title line.
    #[error("changelog is missing the title line {0:?}")]
    TitleNotFound(&'static str),
}

/// Insert a rendered fragment after the changelog's title line.
///
/// # Errors
///
/// [`ChangelogError::TitleNotFound`] if the title line is absent; nothing is
/// silently rewritten in that case.
pub fn insert_fragment(text: &str, fragment: &str) -> Result<String, ChangelogError> {
    if !text.contains(CHANGELOG_TITLE) {
        return Err(ChangelogError::TitleNotFound(CHANGELOG_TITLE));
    }

    Ok(text.replacen(CHANGELOG_TITLE, fragment, 1))
}
