//! Configuration commands for managing storefront settings.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{API_URL_ENV, Config, VALID_KEYS};
use crate::error::{Result, StorefrontError};

/// Validate a config key and convert underscore notation to dot notation suggestion
fn validate_config_key(key: &str) -> Result<&str> {
    if VALID_KEYS.contains(&key) {
        return Ok(key);
    }

    // Only the first underscore is replaced (e.g. catalog_page_size -> catalog.page_size)
    if let Some(pos) = key.find('_') {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        return Err(StorefrontError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{dot_version}'"
        )));
    }
    Ok(key)
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let api_url = config.api_url();
    let overridden = api_url != config.api.base_url;

    let json_output = json!({
        "api": {
            "base_url": config.api.base_url,
            "effective_url": api_url,
        },
        "catalog": {
            "page_size": config.catalog.page_size,
        },
        "search": {
            "debounce_ms": config.search.debounce_ms,
        },
        "remote_timeout": config.remote_timeout,
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text_output.push_str(&format!("{}:\n", "api".cyan()));
    text_output.push_str(&format!("  base_url: {}\n", config.api.base_url));
    if overridden {
        text_output.push_str(&format!(
            "  {}\n",
            format!("overridden by {API_URL_ENV}: {api_url}").yellow()
        ));
    }
    text_output.push('\n');

    text_output.push_str(&format!("{}:\n", "catalog".cyan()));
    text_output.push_str(&format!("  page_size: {}\n", config.catalog.page_size));
    text_output.push('\n');

    text_output.push_str(&format!("{}:\n", "search".cyan()));
    text_output.push_str(&format!("  debounce_ms: {}\n", config.search.debounce_ms));
    text_output.push('\n');

    text_output.push_str(&format!(
        "{}: {}s\n\n",
        "remote_timeout".cyan(),
        config.remote_timeout
    ));
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let stored = config.get(key)?;
    let json_output = json!({
        "action": "config_set",
        "key": key,
        "value": stored,
        "success": true,
    });

    CommandOutput::new(json_output)
        .with_text(format!("Set {} to {}", key.cyan(), stored))
        .print(output)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value)
    .print(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_key_accepts_known_keys() {
        for key in VALID_KEYS {
            assert!(validate_config_key(key).is_ok());
        }
    }

    #[test]
    fn test_validate_config_key_suggests_dot_notation() {
        let err = validate_config_key("catalog_page_size").unwrap_err();
        assert!(err.to_string().contains("catalog.page_size"));
    }
}
