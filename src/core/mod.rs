//! core
//!
//! Pure domain logic: no I/O, no network, no git.
//!
//! # Modules
//!
//! - [`version`]: changelog-heading parsing and release-version prediction
//! - [`ticket`]: ticket-identifier grammar and extraction
//! - [`groups`]: ticket classification into named groups
//! - [`render`]: announcement post and changelog fragment formatting
//! - [`changelog`]: changelog-text fragment insertion

pub mod changelog;
pub mod groups;
pub mod render;
pub mod ticket;
pub mod version;
