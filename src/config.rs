//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_MAP_PATH, DEFAULT_MODEL_CLASSES, DEFAULT_MODEL_PATH, DEFAULT_PORT};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Pre-trained classifier artifact (`.onnx` or `.json`)
    pub model_path: PathBuf,

    /// Persisted map document, overwritten on every successful submission
    pub map_path: PathBuf,

    /// Class names in the order the artifact indexes them
    pub model_classes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            model_classes: DEFAULT_MODEL_CLASSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            map_path: env::var("MAP_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.map_path),

            model_classes: env::var("MODEL_CLASSES")
                .ok()
                .map(|raw| parse_classes(&raw))
                .filter(|classes| !classes.is_empty())
                .unwrap_or(defaults.model_classes),
        }
    }
}

/// Split a comma separated class list, dropping empty entries
fn parse_classes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classes() {
        assert_eq!(parse_classes("High, Low ,Medium"), vec!["High", "Low", "Medium"]);
        assert_eq!(parse_classes(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8501);
        assert_eq!(config.model_path, PathBuf::from("disaster_model.onnx"));
        assert_eq!(config.map_path, PathBuf::from("disaster_risk_map.html"));
        assert_eq!(config.model_classes.len(), 3);
    }
}
