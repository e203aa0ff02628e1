//! gallery-runner library
//!
//! Builds gallery-dl command lines, runs them on a background worker and
//! streams the merged output back to the terminal front end.

pub mod commands;
pub mod core;
pub mod error;
pub mod ui;
pub mod utils;
