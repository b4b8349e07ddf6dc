use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// Application configuration, read once from a JSON file at startup and
/// immutable afterwards.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// Directory name for saved screenshots. Doubles as the public static
    /// mount path the `screenshot` response field points into.
    pub folder: String,
    /// Upper bound on browser instances running at once.
    #[serde(default = "default_max_captures")]
    pub max_captures: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_max_captures() -> usize {
    4
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("invalid config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        // The folder name becomes a single URL path segment.
        if self.folder.is_empty() || self.folder.contains(['/', '\\']) {
            return Err(AppError::Config(
                "folder must be a plain directory name without path separators".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: 3456,
            folder: "screenshots".to_string(),
            max_captures: default_max_captures(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_minimal_config_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "port": 8090, "folder": "shots" }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.port, 8090);
        assert_eq!(config.folder, "shots");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_captures, 4);
    }

    #[test]
    fn rejects_folder_with_path_separators() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "port": 8090, "folder": "a/b" }}"#).unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "port": 8090 }}"#).unwrap();

        assert!(Config::load(file.path()).is_err());
    }
}
