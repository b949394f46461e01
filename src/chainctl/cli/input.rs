use chainctl::error::{ChainError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Resolves the `create` config argument: inline JSON if it parses, otherwise the
/// contents of the file it names.
pub fn read_config_source(arg: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(arg) {
        return Ok(value);
    }

    let path = Path::new(arg);
    let content = fs::read_to_string(path).map_err(|e| {
        ChainError::validation(format!(
            "config must be a JSON blob or a path to a JSON file ({}): {}",
            arg, e
        ))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ChainError::validation(format!("invalid JSON in {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inline_json_is_used_directly() {
        let value = read_config_source(r#"{"url": "http://a"}"#).unwrap();
        assert_eq!(value, json!({"url": "http://a"}));
    }

    #[test]
    fn file_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.json");
        fs::write(&path, r#"{"timeout": 5}"#).unwrap();

        let value = read_config_source(path.to_str().unwrap()).unwrap();
        assert_eq!(value, json!({"timeout": 5}));
    }

    #[test]
    fn missing_file_is_validation_error() {
        let err = read_config_source("/nonexistent/chain.json").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn file_with_invalid_json_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{url:").unwrap();

        let err = read_config_source(path.to_str().unwrap()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("invalid JSON"));
    }
}
