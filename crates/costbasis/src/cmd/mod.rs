//! Command implementations for the CLI.
//!
//! Each module contains the full implementation for a command,
//! which is invoked by the thin wrapper binary.

pub mod completions;
pub mod interactive;
pub mod sale;
