//! CLI command implementations

pub mod completions;
pub mod config;
pub mod eval;
pub mod get;
pub mod io;
pub mod set;
pub mod show;
