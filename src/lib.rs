//! Relnotes - release-notes generator for the Poshi test framework
//!
//! Relnotes is a single-binary tool that is run once per release. It walks the
//! commit history of the Poshi subdirectory inside a larger checkout, extracts
//! issue-tracker ticket identifiers from commit messages, fetches ticket
//! metadata from the tracker, groups tickets by label or component, and
//! prepends a freshly rendered section to the changelog file.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, orchestrates the run)
//! - [`config`] - Run configuration: paths, tracker endpoint, credentials
//! - [`core`] - Pure domain logic: versions, tickets, grouping, rendering
//! - [`git`] - Single interface for all Git operations
//! - [`tracker`] - Abstraction over the issue tracker (Jira REST v2)
//! - [`ui`] - Output utilities
//!
//! # Execution model
//!
//! One run is fully sequential: every tracker call is awaited before the next
//! starts, and any failure aborts the run. The changelog file is written only
//! after every ticket has been fetched and classified; tracker-side link
//! mutations made before a failure are not rolled back.

pub mod cli;
pub mod config;
pub mod core;
pub mod git;
pub mod tracker;
pub mod ui;
