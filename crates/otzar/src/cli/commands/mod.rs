//! Command implementations for the `otzar` CLI.

pub mod build;
pub mod search;
