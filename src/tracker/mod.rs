//! tracker
//!
//! Abstraction over the remote issue tracker.
//!
//! # Architecture
//!
//! The `Tracker` trait defines the two operations the run needs: fetching an
//! issue and creating a link between two issues. The orchestration code takes
//! a `&dyn Tracker`, which keeps the pipeline testable against the in-memory
//! [`mock::MockTracker`].
//!
//! # Modules
//!
//! - `traits`: Core `Tracker` trait and the `Issue` type
//! - [`jira`]: Jira REST v2 implementation with basic authentication
//! - [`mock`]: In-memory implementation for deterministic testing

pub mod jira;
pub mod mock;
mod traits;

pub use traits::*;
