// src/core/mod.rs

pub mod config_state;
pub mod config_store;
pub mod prompt;
pub mod substitution;
pub mod swizzle;
pub mod validation;
