// src/core/substitution.rs

//! Rewrites `"name": "value"` literals in source files.
//!
//! Escaped double quotes (`\"`) already present in a file are hidden behind a
//! per-file sentinel while the replacements run, so the non-greedy value
//! pattern cannot stop on them. The sentinel is swapped back afterwards.

use crate::{
    constants::ESCAPED_QUOTE_MASK_PREFIX,
    system::json_file::{self, FileError},
};
use colored::Colorize;
use indexmap::IndexMap;
use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

const ESCAPED_QUOTE: &str = "\\\"";

#[derive(Error, Debug)]
pub enum SubstitutionError {
    #[error(transparent)]
    File(#[from] FileError),
    #[error("Could not encode the value of '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not build a matcher for '{name}': {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled `"name": "..."` matcher and its replacement text.
#[derive(Debug, Clone)]
pub struct Replacement {
    find: Regex,
    with_value: String,
}

impl Replacement {
    pub fn new(name: &str, value: &str) -> Result<Self, SubstitutionError> {
        let encoded = serde_json::to_string(value).map_err(|source| SubstitutionError::Encode {
            name: name.to_string(),
            source,
        })?;
        // `.*?` stops at the first closing quote.
        let pattern = format!(r#""{}":\s*".*?""#, regex::escape(name));
        let find = Regex::new(&pattern).map_err(|source| SubstitutionError::Pattern {
            name: name.to_string(),
            source,
        })?;
        Ok(Self {
            find,
            with_value: format!("\"{}\": {}", name, encoded),
        })
    }
}

/// Builds one replacement per parameter, in map order.
pub fn build_replacements(
    values: &IndexMap<String, String>,
) -> Result<Vec<Replacement>, SubstitutionError> {
    values
        .iter()
        .map(|(name, value)| Replacement::new(name, value))
        .collect()
}

/// Returns a sentinel that does not occur in `text`.
fn unique_mask(text: &str) -> String {
    loop {
        let key = Uuid::new_v4().simple().to_string();
        let mask = format!(
            "«{}{}»",
            ESCAPED_QUOTE_MASK_PREFIX,
            key.get(..8).unwrap_or(key.as_str())
        );
        if !text.contains(&mask) {
            return mask;
        }
    }
}

/// Applies the replacements to `text` in order and returns the rewritten text.
pub fn substitute_text(text: &str, replacements: &[Replacement]) -> String {
    let mask = unique_mask(text);
    let masked = text.replace(ESCAPED_QUOTE, &mask);
    let updated = replacements.iter().fold(masked, |current, replacement| {
        replacement
            .find
            .replace_all(&current, NoExpand(&replacement.with_value))
            .into_owned()
    });
    updated.replace(&mask, ESCAPED_QUOTE)
}

/// Rewrites every file in place with the given parameter values.
///
/// Returns the paths that were written. A failing read or write stops the
/// run; files already rewritten stay rewritten.
pub fn apply_substitutions<P: AsRef<Path>>(
    values: &IndexMap<String, String>,
    files: &[P],
) -> Result<Vec<PathBuf>, SubstitutionError> {
    let replacements = build_replacements(values)?;
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let path = file.as_ref();
        let text = json_file::read_text(path)?;
        let updated = substitute_text(&text, &replacements);
        json_file::write_text(path, &updated)?;

        log::info!("Swizzled {} ({} params)", path.display(), replacements.len());
        println!("{} {}", t!("swizzle.info.swizzled").green(), path.display());
        written.push(path.to_path_buf());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn values(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn run(text: &str, pairs: &[(&str, &str)]) -> String {
        substitute_text(text, &build_replacements(&values(pairs)).unwrap())
    }

    #[test]
    fn test_replaces_quoted_value() {
        let text = "{\n\t\"appKey\": \"YOUR_APP_KEY\",\n\t\"other\": \"x\"\n}";
        assert_eq!(
            run(text, &[("appKey", "abc123")]),
            "{\n\t\"appKey\": \"abc123\",\n\t\"other\": \"x\"\n}"
        );
    }

    #[test]
    fn test_normalizes_whitespace_after_colon() {
        let text = r#"const conf = {"appUrl":"old", "appUrl"  :  "kept"}"#;
        // Whitespace before the colon is not part of the pattern.
        assert_eq!(
            run(text, &[("appUrl", "new")]),
            r#"const conf = {"appUrl": "new", "appUrl"  :  "kept"}"#
        );
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let text = r#"[{"db": "a"}, {"db": "b"}]"#;
        assert_eq!(run(text, &[("db", "c")]), r#"[{"db": "c"}, {"db": "c"}]"#);
    }

    #[test]
    fn test_is_idempotent() {
        let text = r#"{"appKey": "start", "appPwd": "x"}"#;
        let pairs = [("appKey", "a \"quoted\" value"), ("appPwd", "p$1")];
        let once = run(text, &pairs);
        let twice = run(&once, &pairs);
        assert_eq!(once, twice);
        assert_eq!(once, r#"{"appKey": "a \"quoted\" value", "appPwd": "p$1"}"#);
    }

    #[test]
    fn test_escaped_quotes_are_preserved() {
        let text = r#"{"appKey": "the \"app key\" here", "note": "say \"hi\""}"#;
        let updated = run(text, &[("appKey", "new \"key\"")]);
        assert_eq!(updated, r#"{"appKey": "new \"key\"", "note": "say \"hi\""}"#);
    }

    #[test]
    fn test_name_with_regex_metacharacters_is_literal() {
        let text = r#"{"a.b": "1", "axb": "2"}"#;
        assert_eq!(run(text, &[("a.b", "9")]), r#"{"a.b": "9", "axb": "2"}"#);
    }

    #[test]
    fn test_non_matching_text_passes_through() {
        let text = "not json at all { \"appKey\": 42 }";
        assert_eq!(run(text, &[("appKey", "x")]), text);
    }

    #[test]
    fn test_mask_is_unique_to_text() {
        let text = "plain";
        let mask = unique_mask(text);
        assert!(mask.starts_with("«MaskingEscapedDoubleQuotes_"));
        assert!(mask.ends_with('»'));
    }

    #[test]
    fn test_apply_substitutions_rewrites_files() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("config.json");
        let second = dir.path().join("src/index.js");
        fs::write(&first, "{\"appPort\": \"generated\"}").unwrap();
        fs::create_dir_all(second.parent().unwrap()).unwrap();
        fs::write(&second, "module.exports = {\"appPort\": \"generated\"}").unwrap();

        let written = apply_substitutions(&values(&[("appPort", "8080")]), &[&first, &second]).unwrap();

        assert_eq!(written, vec![first.clone(), second.clone()]);
        assert_eq!(fs::read_to_string(&first).unwrap(), "{\"appPort\": \"8080\"}");
        assert_eq!(
            fs::read_to_string(&second).unwrap(),
            "module.exports = {\"appPort\": \"8080\"}"
        );
    }

    #[test]
    fn test_apply_substitutions_missing_file_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = apply_substitutions(&values(&[("a", "b")]), &[missing]).unwrap_err();
        assert!(matches!(err, SubstitutionError::File(FileError::Read { .. })));
    }
}
