//! Command implementations for the CLI
//!
//! - estimate: Pre-submission cost estimate for a generation job
//! - score: Readability/structure metrics and suggestions for a file
//! - compare: Rank several variation files per metric
//! - config: Configuration display and validation

pub mod compare;
pub mod config;
pub mod estimate;
pub mod score;
