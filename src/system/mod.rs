//! # System Interaction Layer
//!
//! The filesystem capabilities the core calls into.
//!
//! ## Modules
//!
//! - **`json_file`**: Reads and writes text and tab-indented JSON files, creating parent
//!   directories on write and reporting the path involved on every failure.
//! - **`paths`**: Locates `swizzle.json` and the `.swizzlerc` candidates, expands `~/`, and
//!   decides whether two paths name the same file.

pub mod json_file;
pub mod paths;
