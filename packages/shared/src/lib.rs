//! Shared utilities for Hiroba binaries.

pub mod logger;
pub mod time;
