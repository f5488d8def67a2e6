//! Small helpers shared by the AWS clients: file loading, random ids,
//! timestamps and shell escaping.

use rand::Rng;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const RANDOM_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-";

#[derive(Error, Debug)]
pub enum UtilError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Random string of `len` characters from `[a-z0-9-]`.
pub fn random_string(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| RANDOM_CHARSET[rng.gen_range(0..RANDOM_CHARSET.len())] as char)
        .collect()
}

/// Current local time as `YYYYMMDD_HHMMSS`.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn read(path: &Path) -> Result<String, UtilError> {
    fs::read_to_string(path).map_err(|source| UtilError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, UtilError> {
    let path = path.as_ref();
    serde_yaml::from_str(&read(path)?).map_err(|source| UtilError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_json(path: impl AsRef<Path>) -> Result<Value, UtilError> {
    let path = path.as_ref();
    serde_json::from_str(&read(path)?).map_err(|source| UtilError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON file and re-serialize it with sorted keys and 2-space indentation.
pub fn load_json_string(path: impl AsRef<Path>) -> Result<String, UtilError> {
    let path = path.as_ref();
    // serde_json's default map is a BTreeMap, so keys come back sorted.
    let value = load_json(path)?;
    serde_json::to_string_pretty(&value).map_err(|source| UtilError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Backslash-escape every character other than ASCII alphanumerics and `_`.
pub fn shell_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() * 2);
    for c in value.chars() {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Wrap `value` in single quotes for `sh`, closing and reopening around embedded quotes.
pub fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_random_string_charset_and_length() {
        let value = random_string(36);
        assert_eq!(value.len(), 36);
        assert!(value.bytes().all(|b| RANDOM_CHARSET.contains(&b)));
    }

    #[test]
    fn test_random_string_zero_length() {
        assert!(random_string(0).is_empty());
    }

    #[test]
    fn test_timestamp_format() {
        let stamp = timestamp();
        assert_eq!(stamp.len(), 15);
        let (date, time) = stamp.split_once('_').unwrap();
        assert_eq!(date.len(), 8);
        assert_eq!(time.len(), 6);
        assert!(date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_load_json_string_sorts_and_indents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, r#"{"TableName":"users","BillingMode":"PAY_PER_REQUEST"}"#).unwrap();

        let json = load_json_string(&path).unwrap();
        assert_eq!(
            json,
            "{\n  \"BillingMode\": \"PAY_PER_REQUEST\",\n  \"TableName\": \"users\"\n}"
        );
    }

    #[test]
    fn test_load_json_missing_file() {
        let err = load_json("/nonexistent/table.json").unwrap_err();
        assert!(matches!(err, UtilError::Io { .. }));
    }

    #[test]
    fn test_load_yaml_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "key: [unclosed").unwrap();

        let err = load_yaml::<serde_yaml::Value>(&path).unwrap_err();
        assert!(matches!(err, UtilError::Yaml { .. }));
    }

    #[test]
    fn test_load_yaml_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.yaml");
        fs::write(&path, "openapi: 3.0.1\ninfo:\n  title: orders\n").unwrap();

        let value: serde_yaml::Value = load_yaml(&path).unwrap();
        assert_eq!(value["info"]["title"].as_str(), Some("orders"));
    }

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape("v1_2"), "v1_2");
        assert_eq!(shell_escape("$LATEST"), "\\$LATEST");
        assert_eq!(shell_escape("my api v2"), "my\\ api\\ v2");
        assert_eq!(shell_escape("*.txt"), "\\*\\.txt");
    }

    #[test]
    fn test_single_quote() {
        assert_eq!(single_quote("{\"a\": 1}"), "'{\"a\": 1}'");
        assert_eq!(single_quote("it's"), r"'it'\''s'");
    }
}
