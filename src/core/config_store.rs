// src/core/config_store.rs

//! # Config Store
//!
//! Loads a `ConfigState` from `swizzle.json` merged with the rc file's stacks,
//! and saves it back, routing each stack to the file that owns it:
//!
//! - stacks owned by the primary file are written inline under `stacks`;
//! - stacks owned by the rc file are written inline in the rc's `stacks`;
//! - stacks owned by any other file are merged into that file's `stacks` map,
//!   and the rc records a `{"file": path}` pointer to them.

use crate::{
    models::{
        ConfigState, RcConfig, Stack, StackEntry, StackParams, SwizzleJson, params_to_object,
    },
    system::{
        json_file::{self, FileError},
        paths,
    },
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

// --- Loading ---

/// Reads the rc candidates in order. The last one that exists wins entirely;
/// stacks from several rc files are not merged.
pub fn load_rc(candidates: &[PathBuf]) -> Result<RcConfig, FileError> {
    let mut rc = RcConfig::default();
    for candidate in candidates {
        let path = paths::expand_home(candidate);
        if !json_file::is_file(&path) {
            continue;
        }
        log::debug!("Loading rc file: {}", path.display());
        let json: Value = json_file::read_json(&path)?;
        let mut object = match json {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        let stacks = match object.remove("stacks") {
            Some(Value::Object(stacks)) => resolve_stacks(&stacks, &path)?,
            _ => IndexMap::new(),
        };
        rc = RcConfig {
            stack_names: stacks.keys().cloned().collect(),
            stacks,
            source: Some(path),
            extra: object,
        };
    }
    Ok(rc)
}

/// Loads the project configuration from `primary_file`, falling back to the
/// rc stacks for any stack the primary file does not define.
pub fn load_config(primary_file: &Path, rc: &RcConfig) -> Result<ConfigState, FileError> {
    if !json_file::is_file(primary_file) {
        log::debug!(
            "No config at {}; starting from an empty state.",
            primary_file.display()
        );
        return Ok(ConfigState {
            stacks: rc.stacks.clone(),
            rc: rc.without_stacks(),
            file_path: primary_file.to_path_buf(),
            ..Default::default()
        });
    }

    let raw: Value = json_file::read_json(primary_file)?;
    let json: SwizzleJson = serde_json::from_value(raw).map_err(|source| FileError::Parse {
        path: primary_file.to_path_buf(),
        source,
    })?;

    let resolved = resolve_stacks(&json.stacks, primary_file)?;
    let stacks = merge_stacks(resolved, &rc.stacks);

    Ok(ConfigState {
        files: json.files,
        params: json.params,
        stacks,
        stack_name: json.stack_name,
        rc: rc.without_stacks(),
        file_path: primary_file.to_path_buf(),
    })
}

/// Classifies each raw entry of a `stacks` map owned by `owner` and follows
/// external pointers.
fn resolve_stacks(
    raw: &Map<String, Value>,
    owner: &Path,
) -> Result<IndexMap<String, Stack>, FileError> {
    let mut stacks = IndexMap::with_capacity(raw.len());
    for (name, value) in raw {
        let stack = match StackEntry::from_value(value) {
            StackEntry::Inline(params) => Some(Stack::new(params, Some(owner.to_path_buf()))),
            StackEntry::Resolved { params, file } => {
                Some(Stack::new(params, file.or_else(|| Some(owner.to_path_buf()))))
            }
            StackEntry::External(file) => load_external_stack(name, &file)?,
        };
        if let Some(stack) = stack {
            stacks.insert(name.clone(), stack);
        }
    }
    Ok(stacks)
}

/// Reads the entry for `name` from an external stack file.
fn load_external_stack(name: &str, file: &Path) -> Result<Option<Stack>, FileError> {
    let path = paths::expand_home(file);
    if !json_file::is_file(&path) {
        log::warn!(
            "Stack '{}' points to '{}', which does not exist. Skipping it.",
            name,
            path.display()
        );
        return Ok(None);
    }

    let json: Value = json_file::read_json(&path)?;
    let Some(entry) = json.get("stacks").and_then(|stacks| stacks.get(name)) else {
        log::debug!("'{}' has no entry for stack '{}'.", path.display(), name);
        return Ok(None);
    };

    let params = match StackEntry::from_value(entry) {
        StackEntry::Inline(params) | StackEntry::Resolved { params, .. } => params,
        StackEntry::External(nested) => {
            log::warn!(
                "Stack '{}' in '{}' points again to '{}'. Pointers are followed only once.",
                name,
                path.display(),
                nested.display()
            );
            return Ok(None);
        }
    };
    Ok(Some(Stack::new(params, Some(file.to_path_buf()))))
}

/// Adds the fallback stacks under `primary`. For a stack defined in both,
/// primary values win and missing keys are filled from the fallback.
fn merge_stacks(
    mut primary: IndexMap<String, Stack>,
    fallback: &IndexMap<String, Stack>,
) -> IndexMap<String, Stack> {
    for (name, extra) in fallback {
        match primary.get_mut(name) {
            Some(stack) => {
                for (key, value) in &extra.params {
                    stack
                        .params
                        .entry(key.clone())
                        .or_insert_with(|| value.clone());
                }
                if stack.file.is_none() {
                    stack.file = extra.file.clone();
                }
            }
            None => {
                primary.insert(name.clone(), extra.clone());
            }
        }
    }
    primary
}

// --- Saving ---

/// Persists `state` with `target_file` as the primary config file.
///
/// Writes the primary file, every external stack file in use, and the rc
/// file next to `target_file` when at least one stack lives outside the
/// primary file. An rc that already exists, or that held a stack since
/// removed, is rewritten with the surviving stacks. Values of `noSave`
/// parameters are never written.
pub fn save_config(state: &ConfigState, target_file: &Path) -> Result<(), FileError> {
    let rc_file = paths::rc_path_for(target_file);
    let unsaved: HashSet<&str> = state
        .params
        .iter()
        .filter(|p| p.no_save)
        .map(|p| p.name.as_str())
        .collect();

    let mut primary_stacks = Map::new();
    let mut rc_stacks = Map::new();

    for (name, stack) in &state.stacks {
        let params: StackParams = stack
            .params
            .iter()
            .filter(|(key, _)| !unsaved.contains(key.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let entry = Value::Object(params_to_object(&params));

        match stack.file.as_deref() {
            None => {
                primary_stacks.insert(name.clone(), entry);
            }
            Some(file) if file.as_os_str().is_empty() || paths::same_path(file, target_file) => {
                primary_stacks.insert(name.clone(), entry);
            }
            Some(file) if paths::same_path(file, &rc_file) => {
                rc_stacks.insert(name.clone(), entry);
            }
            Some(file) => {
                write_external_stack(file, name, entry)?;
                rc_stacks.insert(name.clone(), pointer_to(file));
            }
        }
    }

    if !rc_stacks.is_empty()
        || json_file::is_file(&rc_file)
        || state.rc.lost_stacks(&state.stacks)
    {
        write_rc(&rc_file, &state.rc.extra, rc_stacks)?;
    }

    let swizzle_json = SwizzleJson {
        files: state.files.clone(),
        params: state.params.clone(),
        stacks: primary_stacks,
        stack_name: state.stack_name.clone(),
    };
    json_file::write_json(target_file, &swizzle_json)?;
    log::info!("Saved configuration to {}", target_file.display());
    Ok(())
}

/// Replaces the rc file's `stacks` and lays `extra` over its other keys.
/// The `stacks` key is dropped when no stack is left.
fn write_rc(
    rc_file: &Path,
    extra: &Map<String, Value>,
    stacks: Map<String, Value>,
) -> Result<(), FileError> {
    let existing: Value = if json_file::is_file(rc_file) {
        json_file::read_json(rc_file)?
    } else {
        Value::Null
    };
    let mut rc_json = match existing {
        Value::Object(object) => object,
        _ => Map::new(),
    };
    rc_json.remove("stacks");
    for (key, value) in extra {
        rc_json.insert(key.clone(), value.clone());
    }
    if !stacks.is_empty() {
        rc_json.insert("stacks".to_string(), Value::Object(stacks));
    }
    log::debug!("Writing rc file: {}", rc_file.display());
    json_file::write_json(rc_file, &Value::Object(rc_json))
}

/// Merges one stack into an external file, keeping the file's other stacks.
fn write_external_stack(file: &Path, name: &str, entry: Value) -> Result<(), FileError> {
    let path = paths::expand_home(file);
    let mut json = if json_file::is_file(&path) {
        json_file::read_json(&path)?
    } else {
        Value::Object(Map::new())
    };

    if !json.is_object() {
        json = Value::Object(Map::new());
    }
    if let Value::Object(object) = &mut json {
        let stacks = object
            .entry("stacks")
            .or_insert_with(|| Value::Object(Map::new()));
        if !stacks.is_object() {
            *stacks = Value::Object(Map::new());
        }
        if let Value::Object(stacks) = stacks {
            stacks.insert(name.to_string(), entry);
        }
    }

    log::debug!("Writing stack '{}' to {}", name, path.display());
    json_file::write_json(&path, &json)
}

fn pointer_to(file: &Path) -> Value {
    let mut pointer = Map::new();
    pointer.insert(
        "file".to_string(),
        Value::String(file.to_string_lossy().into_owned()),
    );
    Value::Object(pointer)
}

/// Reads the values of one stack straight from a stacks file.
#[cfg(test)]
pub(crate) fn read_stack_params(file: &Path, name: &str) -> Result<Option<StackParams>, FileError> {
    let json: Value = json_file::read_json(file)?;
    Ok(json
        .get("stacks")
        .and_then(|stacks| stacks.get(name))
        .and_then(Value::as_object)
        .map(crate::models::params_from_object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParamInput, Parameter};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn params(pairs: &[(&str, &str)]) -> StackParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn read(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn sample_state(primary: &Path) -> ConfigState {
        let mut state = ConfigState {
            file_path: primary.to_path_buf(),
            ..Default::default()
        };
        state.add_files(&["src/config.json".to_string(), "src/index.js".to_string()]);
        state.add_param(&ParamInput::named("appKey")).unwrap();
        state
            .add_param(&ParamInput {
                no_save: Some(true),
                password: Some(true),
                ..ParamInput::named("appPwd")
            })
            .unwrap();
        state
    }

    #[test]
    fn test_round_trip_inline_stacks_drops_no_save_values() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let mut state = sample_state(&primary);
        state.add_stack(
            "dev",
            params(&[("appKey", "K"), ("appPwd", "secret")]),
            Some(primary.clone()),
        );
        state.stack_name = Some("dev".to_string());

        save_config(&state, &primary).unwrap();
        let loaded = load_config(&primary, &RcConfig::default()).unwrap();

        assert_eq!(loaded.files, state.files);
        assert_eq!(loaded.params, state.params);
        assert_eq!(loaded.stack_name.as_deref(), Some("dev"));
        assert_eq!(loaded.stacks["dev"].params, params(&[("appKey", "K")]));
        assert_eq!(loaded.stacks["dev"].file.as_deref(), Some(primary.as_path()));
        assert!(!dir.path().join(".swizzlerc").exists());
    }

    #[test]
    fn test_saved_file_layout() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let mut state = sample_state(&primary);
        state.add_stack("dev", params(&[("appKey", "K")]), None);

        save_config(&state, &primary).unwrap();

        assert_eq!(
            read(&primary),
            json!({
                "files": ["src/config.json", "src/index.js"],
                "params": [
                    {"name": "appKey", "description": "your app key", "defaultValue": "YOUR_APP_KEY"},
                    {
                        "name": "appPwd",
                        "description": "your app pwd",
                        "defaultValue": "YOUR_APP_PWD",
                        "password": true,
                        "noSave": true
                    }
                ],
                "stacks": {"dev": {"appKey": "K"}}
            })
        );
        assert!(fs::read_to_string(&primary).unwrap().starts_with("{\n\t\"files\""));
    }

    #[test]
    fn test_empty_stacks_key_is_omitted() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let state = sample_state(&primary);

        save_config(&state, &primary).unwrap();

        let json = read(&primary);
        assert!(json.get("stacks").is_none());
        assert!(json.get("stackName").is_none());
        assert!(!dir.path().join(".swizzlerc").exists());
    }

    #[test]
    fn test_external_stack_routes_through_rc() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let external = dir.path().join("secrets/prod.json");
        fs::create_dir_all(external.parent().unwrap()).unwrap();
        fs::write(&external, r#"{"stacks": {"other": {"appKey": "O"}}, "note": "kept"}"#).unwrap();

        let mut state = sample_state(&primary);
        state.add_stack("prod", params(&[("appKey", "P"), ("appPwd", "x")]), Some(external.clone()));
        save_config(&state, &primary).unwrap();

        assert!(read(&primary).get("stacks").is_none());
        assert_eq!(
            read(&external),
            json!({"stacks": {"other": {"appKey": "O"}, "prod": {"appKey": "P"}}, "note": "kept"})
        );
        let rc_file = dir.path().join(".swizzlerc");
        assert_eq!(
            read(&rc_file),
            json!({"stacks": {"prod": {"file": external.to_string_lossy()}}})
        );

        let rc = load_rc(&[rc_file.clone()]).unwrap();
        assert_eq!(rc.source.as_deref(), Some(rc_file.as_path()));
        let loaded = load_config(&primary, &rc).unwrap();
        assert_eq!(loaded.stacks["prod"].params, params(&[("appKey", "P")]));
        assert_eq!(loaded.stacks["prod"].file.as_deref(), Some(external.as_path()));
        assert!(!loaded.stacks.contains_key("other"));
        assert!(loaded.rc.stacks.is_empty());
    }

    #[test]
    fn test_stack_owned_by_rc_is_written_inline_in_rc() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let rc_file = dir.path().join(".swizzlerc");

        let mut state = sample_state(&primary);
        state.add_stack("local", params(&[("appKey", "L")]), Some(rc_file.clone()));
        save_config(&state, &primary).unwrap();

        assert_eq!(read(&rc_file), json!({"stacks": {"local": {"appKey": "L"}}}));

        let rc = load_rc(&[rc_file.clone()]).unwrap();
        let loaded = load_config(&primary, &rc).unwrap();
        assert_eq!(loaded.stacks["local"].params, params(&[("appKey", "L")]));
        assert_eq!(loaded.stacks["local"].file.as_deref(), Some(rc_file.as_path()));
    }

    #[test]
    fn test_rc_extra_keys_survive_save() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let external = dir.path().join("qa.json");
        let mut state = sample_state(&primary);
        state.rc.extra.insert("owner".to_string(), json!("ops"));
        state.add_stack("qa", params(&[("appKey", "Q")]), Some(external.clone()));

        save_config(&state, &primary).unwrap();

        let rc = read(&dir.path().join(".swizzlerc"));
        assert_eq!(rc.get("owner"), Some(&json!("ops")));
    }

    #[test]
    fn test_removing_last_rc_stack_rewrites_rc() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let rc_file = dir.path().join(".swizzlerc");
        let external = dir.path().join("prod.json");
        let mut state = sample_state(&primary);
        state.rc.extra.insert("owner".to_string(), json!("ops"));
        state.add_stack("prod", params(&[("appKey", "P")]), Some(external.clone()));
        save_config(&state, &primary).unwrap();

        let rc = load_rc(&[rc_file.clone()]).unwrap();
        assert_eq!(rc.stack_names, vec!["prod".to_string()]);
        let mut state = load_config(&primary, &rc).unwrap();
        state.remove_stack("prod");
        save_config(&state, &primary).unwrap();

        assert_eq!(read(&rc_file), json!({"owner": "ops"}));
        let reloaded = load_config(&primary, &load_rc(&[rc_file]).unwrap()).unwrap();
        assert!(reloaded.stacks.is_empty());
    }

    #[test]
    fn test_removing_stack_from_home_rc_shadows_it_locally() {
        let home = tempdir().unwrap();
        let project = tempdir().unwrap();
        let home_rc = home.path().join(".swizzlerc");
        let local_rc = project.path().join(".swizzlerc");
        let primary = project.path().join("swizzle.json");
        fs::write(&home_rc, r#"{"stacks": {"dev": {"appKey": "H"}}}"#).unwrap();

        let rc = load_rc(&[home_rc.clone(), local_rc.clone()]).unwrap();
        let mut state = load_config(&primary, &rc).unwrap();
        assert!(state.stacks.contains_key("dev"));
        state.remove_stack("dev");
        save_config(&state, &primary).unwrap();

        assert_eq!(read(&local_rc), json!({}));
        let reloaded = load_config(&primary, &load_rc(&[home_rc, local_rc]).unwrap()).unwrap();
        assert!(reloaded.stacks.is_empty());
    }

    #[test]
    fn test_missing_primary_seeds_from_rc() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let rc = RcConfig {
            stacks: IndexMap::from([(
                "dev".to_string(),
                Stack::new(params(&[("appKey", "R")]), None),
            )]),
            ..Default::default()
        };

        let state = load_config(&primary, &rc).unwrap();

        assert!(state.files.is_empty());
        assert!(state.params.is_empty());
        assert_eq!(state.stacks["dev"].params, params(&[("appKey", "R")]));
        assert_eq!(state.file_path, primary);
    }

    #[test]
    fn test_primary_values_win_over_rc() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        fs::write(
            &primary,
            r#"{"files": [], "params": [], "stacks": {"dev": {"appKey": "primary"}}}"#,
        )
        .unwrap();
        let rc = RcConfig {
            stacks: IndexMap::from([
                (
                    "dev".to_string(),
                    Stack::new(params(&[("appKey", "rc"), ("extra", "E")]), None),
                ),
                ("qa".to_string(), Stack::new(params(&[("appKey", "Q")]), None)),
            ]),
            ..Default::default()
        };

        let state = load_config(&primary, &rc).unwrap();

        assert_eq!(
            state.stacks["dev"].params,
            params(&[("appKey", "primary"), ("extra", "E")])
        );
        assert_eq!(state.stacks["qa"].params, params(&[("appKey", "Q")]));
    }

    #[test]
    fn test_load_accepts_every_entry_shape() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let external = dir.path().join("ext.json");
        fs::write(&external, r#"{"stacks": {"ext": {"appKey": "X"}}}"#).unwrap();
        fs::write(
            &primary,
            json!({
                "files": ["a.json"],
                "stacks": {
                    "flat": {"appKey": "F"},
                    "shaped": {"params": {"appKey": "S"}},
                    "ext": {"file": external.to_string_lossy()},
                    "gone": {"file": dir.path().join("missing.json").to_string_lossy()}
                }
            })
            .to_string(),
        )
        .unwrap();

        let state = load_config(&primary, &RcConfig::default()).unwrap();

        assert_eq!(state.files, vec!["a.json".to_string()]);
        assert_eq!(state.stacks["flat"].params, params(&[("appKey", "F")]));
        assert_eq!(state.stacks["shaped"].params, params(&[("appKey", "S")]));
        assert_eq!(state.stacks["shaped"].file.as_deref(), Some(primary.as_path()));
        assert_eq!(state.stacks["ext"].params, params(&[("appKey", "X")]));
        assert_eq!(state.stacks["ext"].file.as_deref(), Some(external.as_path()));
        assert!(!state.stacks.contains_key("gone"));
    }

    #[test]
    fn test_pointer_with_extra_keys_is_followed() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let external = dir.path().join("ext.json");
        fs::write(&external, r#"{"stacks": {"qa": {"appKey": "Q"}}}"#).unwrap();
        fs::write(
            &primary,
            json!({"stacks": {"qa": {"file": external.to_string_lossy(), "note": "x"}}}).to_string(),
        )
        .unwrap();

        let state = load_config(&primary, &RcConfig::default()).unwrap();

        assert_eq!(state.stacks["qa"].params, params(&[("appKey", "Q")]));
        assert_eq!(state.stacks["qa"].file.as_deref(), Some(external.as_path()));
        assert!(!state.stacks["qa"].params.contains_key("file"));
    }

    #[test]
    fn test_stale_stack_keys_are_kept() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let mut state = sample_state(&primary);
        state.add_stack("dev", params(&[("removedParam", "still here")]), None);

        save_config(&state, &primary).unwrap();
        let loaded = load_config(&primary, &RcConfig::default()).unwrap();

        assert_eq!(loaded.stacks["dev"].params, params(&[("removedParam", "still here")]));
    }

    #[test]
    fn test_load_rc_last_file_wins() {
        let dir = tempdir().unwrap();
        let home_rc = dir.path().join("home.swizzlerc");
        let local_rc = dir.path().join("local.swizzlerc");
        fs::write(&home_rc, r#"{"stacks": {"home": {"appKey": "H"}}}"#).unwrap();
        fs::write(&local_rc, r#"{"stacks": {"local": {"appKey": "L"}}}"#).unwrap();

        let rc = load_rc(&[home_rc, dir.path().join("absent"), local_rc.clone()]).unwrap();

        assert_eq!(rc.stacks.keys().collect::<Vec<_>>(), vec!["local"]);
        assert_eq!(rc.source, Some(local_rc));
    }

    #[test]
    fn test_load_rejects_invalid_primary() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        fs::write(&primary, r#"{"params": "not a list"}"#).unwrap();

        let err = load_config(&primary, &RcConfig::default()).unwrap_err();
        assert!(matches!(err, FileError::Parse { .. }));
    }

    #[test]
    fn test_read_stack_params() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("stacks.json");
        fs::write(&file, r#"{"stacks": {"dev": {"a": "1"}}}"#).unwrap();

        assert_eq!(read_stack_params(&file, "dev").unwrap(), Some(params(&[("a", "1")])));
        assert_eq!(read_stack_params(&file, "prod").unwrap(), None);
    }

    #[test]
    fn test_param_records_keep_choices_and_rules() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("swizzle.json");
        let mut state = sample_state(&primary);
        state.params.push(Parameter {
            name: "region".to_string(),
            description: "region".to_string(),
            default_value: "eu".to_string(),
            choices: Some(vec!["eu".to_string(), "us".to_string()]),
            regex: Some(IndexMap::from([("two letters".to_string(), "^[a-z]{2}$".to_string())])),
            ..Default::default()
        });

        save_config(&state, &primary).unwrap();
        let loaded = load_config(&primary, &RcConfig::default()).unwrap();

        assert_eq!(loaded.params, state.params);
    }
}
