//! Common utilities for jsxtree.
//!
//! This crate provides shared infrastructure used by all jsxtree components:
//! - **Warning System** - deduplicated, colored terminal output for recoverable
//!   problems (skipped characters, duplicate attributes, failed resolutions)

pub mod warning;
