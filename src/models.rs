// src/models.rs

use crate::constants::SWIZZLE_CONFIG_FILENAME;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Resolved values of a stack, keyed by parameter name.
pub type StackParams = IndexMap<String, String>;

// --- Parameters ---

/// A named configuration value declared in `swizzle.json`.
///
/// The three flags are only written when `true`, so a freshly declared
/// parameter serializes as `{name, description, defaultValue}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_value: String,
    /// The value comes from a build script rather than from the user.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generated: bool,
    /// The value is masked on entry.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub password: bool,
    /// The value is never persisted and is asked for on every activation.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_save: bool,
    /// When present, the value is picked from this list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// Validation rules: failure message -> pattern (or `not: pattern`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<IndexMap<String, String>>,
}

/// The fields a caller may supply when declaring or updating a parameter.
/// `None` means "not given": an update keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamInput {
    pub name: String,
    pub description: Option<String>,
    pub default_value: Option<String>,
    pub generated: Option<bool>,
    pub password: Option<bool>,
    pub no_save: Option<bool>,
}

impl ParamInput {
    /// An input carrying only the parameter name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

// --- Stacks ---

/// A named, resolved set of parameter values.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    pub params: StackParams,
    /// Where the values are persisted. `None` means the primary config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Stack {
    pub fn new(params: StackParams, file: Option<PathBuf>) -> Self {
        Self { params, file }
    }

    /// Whether the stack holds a non-empty value for `name`.
    pub fn has_value(&self, name: &str) -> bool {
        self.params.get(name).is_some_and(|v| !v.is_empty())
    }
}

/// The shapes a `stacks` entry can take on disk, classified once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEntry {
    /// `{"appKey": "..."}`: the entry is the params object itself.
    Inline(StackParams),
    /// `{"file": "path"}`: the values live in another file's `stacks` map.
    External(PathBuf),
    /// `{"params": {...}, "file": "path"}`: already in the in-memory shape.
    Resolved {
        params: StackParams,
        file: Option<PathBuf>,
    },
}

impl StackEntry {
    /// Classifies a raw JSON entry.
    ///
    /// An object with a `params` object is resolved. Otherwise a non-empty
    /// string `file` makes it a pointer, whatever other keys it carries.
    /// Anything else is read as params.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::Inline(StackParams::new());
        };

        if let Some(Value::Object(params)) = object.get("params") {
            let file = object
                .get("file")
                .and_then(Value::as_str)
                .filter(|f| !f.is_empty())
                .map(PathBuf::from);
            return Self::Resolved {
                params: params_from_object(params),
                file,
            };
        }

        if let Some(Value::String(file)) = object.get("file") {
            if !file.is_empty() {
                return Self::External(PathBuf::from(file));
            }
        }

        Self::Inline(params_from_object(object))
    }
}

/// Converts a JSON object into stack params. Non-string scalars keep their
/// JSON text; nested values are skipped since parameters are flat strings.
pub fn params_from_object(object: &Map<String, Value>) -> StackParams {
    object
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key.clone(), s.clone())),
            Value::Number(n) => Some((key.clone(), n.to_string())),
            Value::Bool(b) => Some((key.clone(), b.to_string())),
            _ => {
                log::debug!("Skipping non-scalar value for stack param '{}'.", key);
                None
            }
        })
        .collect()
}

/// Converts stack params back into a JSON object.
pub fn params_to_object(params: &StackParams) -> Map<String, Value> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect()
}

// --- RC file ---

/// What was read from the rc file(s).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RcConfig {
    /// Stacks resolved from the rc file. Emptied once merged into a `ConfigState`.
    pub stacks: IndexMap<String, Stack>,
    /// The rc file the values were read from.
    pub source: Option<PathBuf>,
    /// Any other top-level keys, written back untouched.
    pub extra: Map<String, Value>,
    /// Names of the stacks the rc file held when it was read.
    pub stack_names: Vec<String>,
}

impl RcConfig {
    /// The same metadata without the stacks, as attached to a loaded state.
    pub fn without_stacks(&self) -> Self {
        Self {
            stacks: IndexMap::new(),
            source: self.source.clone(),
            extra: self.extra.clone(),
            stack_names: self.stack_names.clone(),
        }
    }

    /// True when a stack the rc file held is no longer in `stacks`.
    pub fn lost_stacks<V>(&self, stacks: &IndexMap<String, V>) -> bool {
        self.stack_names.iter().any(|name| !stacks.contains_key(name))
    }
}

// --- Config state ---

/// The whole in-memory configuration of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigState {
    pub files: Vec<String>,
    pub params: Vec<Parameter>,
    pub stacks: IndexMap<String, Stack>,
    pub stack_name: Option<String>,
    pub rc: RcConfig,
    /// Path of the primary config file.
    pub file_path: PathBuf,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            params: Vec::new(),
            stacks: IndexMap::new(),
            stack_name: None,
            rc: RcConfig::default(),
            file_path: PathBuf::from(SWIZZLE_CONFIG_FILENAME),
        }
    }
}

/// The persisted body of `swizzle.json`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwizzleJson {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub stacks: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
}
