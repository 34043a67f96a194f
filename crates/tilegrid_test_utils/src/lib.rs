//! # Tilegrid Test Utilities
//!
//! Shared testing utilities for the grid crates:
//! - Grid fixtures and recording collaborators
//! - Determinism test harness over scripted grid operations
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;

/// Re-export proptest for convenience.
pub use proptest;
