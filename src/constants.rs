// src/constants.rs

/// The name of the project configuration file, looked up in the working directory.
pub const SWIZZLE_CONFIG_FILENAME: &str = "swizzle.json";

/// The name of the rc file recording stacks that live outside `swizzle.json`.
pub const RC_FILENAME: &str = ".swizzlerc";

/// Prefix of the per-file sentinel that hides escaped double quotes during substitution.
pub const ESCAPED_QUOTE_MASK_PREFIX: &str = "MaskingEscapedDoubleQuotes_";

/// The stack name offered when none has been chosen yet.
pub const DEFAULT_STACK_NAME: &str = "dev";

/// The default value given to parameters whose value is produced by a build script.
pub const GENERATED_DEFAULT_VALUE: &str = "generated";
