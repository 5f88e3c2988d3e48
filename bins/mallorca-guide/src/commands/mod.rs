//! CLI command implementations

pub mod distance;
pub mod list;
pub mod nearby;
pub mod region;
pub mod seed;
pub mod show;
