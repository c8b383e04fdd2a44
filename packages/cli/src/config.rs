use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Export destination
    pub out_dir: String,

    /// Quiet period before the preview re-renders
    pub preview_debounce_ms: u64,

    /// Undo levels kept per history lane
    pub history_limit: usize,

    /// Where watch-mode preview frames are written
    pub preview_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: "dist".to_string(),
            preview_debounce_ms: 150,
            history_limit: 50,
            preview_file: "preview.html".to_string(),
        }
    }
}

impl Config {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    pub fn preview_file(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.preview_file)
    }

    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.preview_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "outDir": "public",
            "previewDebounceMs": 300,
            "historyLimit": 10,
            "previewFile": "out/preview.html"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.out_dir, "public");
        assert_eq!(config.preview_debounce(), Duration::from_millis(300));
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.preview_file, "out/preview.html");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: Config = serde_json::from_str(r#"{ "outDir": "site" }"#).unwrap();
        assert_eq!(config.out_dir, "site");
        assert_eq!(config.preview_debounce_ms, 150);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.preview_file, "preview.html");
    }

    #[test]
    fn test_load_without_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "historyLimit": 5 }"#).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.out_dir(dir.path()), dir.path().join("dist"));
    }
}
