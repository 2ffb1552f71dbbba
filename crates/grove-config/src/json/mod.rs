//! JSON form of a decoded manifest
//!
//! This is the contract consumed by resolvers and fetchers: field names match
//! the manifest (`name`, `dependencies`, `packages`, `repo`, `version`) and
//! package names are bare strings.

use crate::ConfigResult;
use camino::Utf8Path;
use grove_core::error::GroveError;
use grove_core::Config;

/// Parse a JSON string into a `Config`
pub fn parse_config_json(content: &str) -> ConfigResult<Config> {
    serde_json::from_str(content).map_err(|e| {
        GroveError::Json {
            message: format!("JSON parsing error: {}", e),
        }
        .into()
    })
}

/// Serialize a `Config` to pretty-printed JSON
pub fn serialize_config_json(config: &Config) -> ConfigResult<String> {
    serde_json::to_string_pretty(config).map_err(|e| {
        GroveError::Json {
            message: format!("JSON serialization error: {}", e),
        }
        .into()
    })
}

/// Load a `Config` previously written as JSON
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<Config> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| GroveError::io(format!("Failed to read {}", path), e))?;

    parse_config_json(&content).map_err(|e| match e {
        crate::ConfigError::Grove(GroveError::Json { message }) => GroveError::Json {
            message: format!("In file {}: {}", path, message),
        }
        .into(),
        other => other,
    })
}

/// Write a `Config` as JSON
pub async fn write_to_file(path: &Utf8Path, config: &Config) -> ConfigResult<()> {
    let mut content = serialize_config_json(config)?;
    content.push('\n');
    tokio::fs::write(path, content)
        .await
        .map_err(|e| GroveError::io(format!("Failed to write {}", path), e))?;
    Ok(())
}
