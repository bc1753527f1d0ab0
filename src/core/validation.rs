// src/core/validation.rs

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// `not:` followed by at most one whitespace character.
    static ref NEGATION_PREFIX_RE: Regex = Regex::new(r"^not:\s?").expect("static regex is valid");
}

#[derive(Error, Debug)]
#[error("Validation rule '{message}' has an invalid pattern '{pattern}': {source}")]
pub struct RuleError {
    pub message: String,
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

#[derive(Debug, Clone)]
struct Rule {
    message: String,
    pattern: Regex,
    negate: bool,
}

/// Checks user input against a parameter's `regex` rules.
///
/// A plain rule must match somewhere in the input; a `not:` rule must not.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Vec<Rule>,
}

impl Validator {
    /// Compiles a failure-message -> rule mapping.
    pub fn new(rules: &IndexMap<String, String>) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .map(|(message, raw)| {
                let negate = NEGATION_PREFIX_RE.is_match(raw);
                let pattern = if negate {
                    NEGATION_PREFIX_RE.replace(raw, "").into_owned()
                } else {
                    raw.clone()
                };
                let compiled = Regex::new(&pattern).map_err(|source| RuleError {
                    message: message.clone(),
                    pattern: pattern.clone(),
                    source,
                })?;
                Ok(Rule {
                    message: message.clone(),
                    pattern: compiled,
                    negate,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    /// Runs every rule. On failure the error is the failing messages joined by spaces.
    pub fn validate(&self, input: &str) -> Result<(), String> {
        let failed: Vec<&str> = self
            .rules
            .iter()
            .filter(|rule| rule.pattern.is_match(input) == rule.negate)
            .map(|rule| rule.message.as_str())
            .collect();

        if failed.is_empty() {
            Ok(())
        } else {
            Err(failed.join(" "))
        }
    }
}
