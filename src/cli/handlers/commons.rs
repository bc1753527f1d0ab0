// src/cli/handlers/commons.rs

// Shared helpers for the command handlers.

use anyhow::{Result, anyhow};

use crate::{
    core::{config_state::key_case, prompt::DialoguerPrompter, swizzle::Swizzle},
    models::{Parameter, StackParams},
};

/// Opens a session on `./swizzle.json` with terminal prompts.
pub fn open_session() -> Result<Swizzle<DialoguerPrompter>> {
    Ok(Swizzle::initialize(DialoguerPrompter)?)
}

/// The value a code file should carry for `param` before any stack is applied.
fn sample_value(param: &Parameter) -> String {
    if !param.default_value.is_empty() {
        return param.default_value.clone();
    }
    let label = if param.description.is_empty() {
        &param.name
    } else {
        &param.description
    };
    key_case(&format!("Your_{}", label))
}

/// Renders the `"name": "value"` snippet for the given parameters, or only
/// for `only` when set.
pub fn samples(params: &[Parameter], only: Option<&str>) -> String {
    let lines: Vec<String> = params
        .iter()
        .filter(|p| only.is_none_or(|name| p.name == name))
        .map(|p| format!("\n\t\t\"{}\": \"{}\"", p.name, sample_value(p)))
        .collect();
    format!("\t{{{}\n\t}}", lines.join(","))
}

/// Splits `KEY=VALUE`. The value may contain further `=` signs.
pub fn parse_key_value(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!(t!("error.invalid_key_value"), value = raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!(t!("error.invalid_key_value"), value = raw));
    }
    Ok((key.to_string(), value.to_string()))
}

pub fn parse_key_values(raw: &[String]) -> Result<StackParams> {
    raw.iter().map(|pair| parse_key_value(pair)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn param(name: &str, description: &str, default_value: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            description: description.to_string(),
            default_value: default_value.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_samples_snippet() {
        let params = vec![
            param("appKey", "your app key", "YOUR_APP_KEY"),
            param("appPort", "", ""),
        ];
        assert_eq!(
            samples(&params, None),
            "\t{\n\t\t\"appKey\": \"YOUR_APP_KEY\",\n\t\t\"appPort\": \"YOUR_APP_PORT\"\n\t}"
        );
        assert_eq!(
            samples(&params, Some("appKey")),
            "\t{\n\t\t\"appKey\": \"YOUR_APP_KEY\"\n\t}"
        );
    }

    #[test]
    fn test_sample_value_falls_back_to_description() {
        assert_eq!(sample_value(&param("x", "db host", "")), "YOUR_DB_HOST");
    }

    #[test]
    fn test_parse_key_values() {
        let values = parse_key_values(&["appPort=3000".to_string(), "url=a=b".to_string()]).unwrap();
        assert_eq!(values.get("appPort").map(String::as_str), Some("3000"));
        assert_eq!(values.get("url").map(String::as_str), Some("a=b"));

        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }
}
