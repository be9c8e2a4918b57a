//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. All repository reads flow through
//! this interface; no other module imports `git2`. The tool never mutates the
//! repository - every operation here is a read.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - HEAD resolution
//! - Path-scoped history walks (bounded window and exclusive-to-inclusive range)
//! - Reading a file's content at a historical commit

mod interface;

pub use interface::{CommitId, CommitInfo, Git, GitError};
