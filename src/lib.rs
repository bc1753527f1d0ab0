//! `swizzle` keeps a project's configuration parameters in `swizzle.json`,
//! resolves named stacks of values for them, and rewrites the matching
//! `"name": "value"` literals in the project's source files.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
