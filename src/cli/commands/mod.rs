//! cli::commands
//!
//! Command handlers.

mod generate;

// Re-exported for testing and direct invocation.
pub use generate::{generate, run_with_tracker, GenerateArgs};
