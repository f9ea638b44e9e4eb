//! CLI command implementations.

pub mod common;
pub mod config;
pub mod devices;
pub mod effects;
pub mod render;
pub mod run;
