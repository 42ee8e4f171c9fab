//! CLI commands

pub mod diff;
pub mod list;
pub mod orphans;
