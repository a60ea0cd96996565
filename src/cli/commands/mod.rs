//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod chain;
pub mod classify;
pub mod init;
pub mod process;
pub mod redact;
pub mod validate;
