// src/cli/handlers/mod.rs

// One handler per CLI action. Every handler parses its own arguments.

pub mod add_param;
pub mod clean;
pub mod commons;
pub mod files;
pub mod generated;
pub mod list;
pub mod remove_param;
pub mod remove_stack;
pub mod stack;
