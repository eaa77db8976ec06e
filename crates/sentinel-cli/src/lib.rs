//! CLI library components for the Sentinel wizard.

#![allow(missing_docs)]

pub mod cli;
pub mod logging;
pub mod progress;
pub mod summary;
