//! Command implementations
//!
//! Commands are split the way git splits them:
//!
//! - `plumbing`: Low-level commands for direct object and ref manipulation
//! - `porcelain`: User-facing commands (init, checkout)
//!
//! Every command is an `impl Repository` block that prints to the repository's
//! writer; none of them parse object bytes themselves.

pub mod plumbing;
pub mod porcelain;
