//! CLI command implementations

pub mod collect;
pub mod completions;
pub mod config;
pub mod export;
pub mod new;
pub mod report;
pub mod schema;
pub mod validate;
