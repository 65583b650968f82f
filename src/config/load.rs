use crate::config::types::{Config, SETTINGS_FILE_NAME, UserSettings, normalize_extensions};
use anyhow::{Context, Result, bail};
use log::warn;
use std::fs;
use std::path::Path;

/// 編譯時嵌入的預設設定（不需要外部檔案）
const DEFAULT_SETTINGS_JSON: &str = include_str!("../data/default_settings.json");

impl Config {
    pub fn new() -> Result<Self> {
        Self::load_from(Path::new(SETTINGS_FILE_NAME))
    }

    /// 載入預設設定，再以 `settings_path` 的內容覆寫
    ///
    /// 設定檔不存在時使用預設值；無法讀取或解析時記錄警告並使用預設值
    pub fn load_from(settings_path: &Path) -> Result<Self> {
        let defaults = Self::load_embedded_settings()?;
        let user_extensions = match Self::load_settings(settings_path) {
            Ok(settings) => settings.extensions,
            Err(e) => {
                warn!("Ignoring settings file: {e:#}");
                None
            }
        };

        let extensions = user_extensions
            .map(|exts| normalize_extensions(&exts))
            .filter(|exts| !exts.is_empty())
            .unwrap_or(defaults);

        Ok(Self { extensions })
    }

    fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// 從編譯時嵌入的 JSON 載入預設副檔名
    fn load_embedded_settings() -> Result<Vec<String>> {
        let settings: UserSettings =
            serde_json::from_str(DEFAULT_SETTINGS_JSON).context("無法解析嵌入的預設設定")?;
        let extensions = normalize_extensions(&settings.extensions.unwrap_or_default());
        if extensions.is_empty() {
            bail!("嵌入的預設設定沒有任何副檔名");
        }
        Ok(extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_settings_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join(SETTINGS_FILE_NAME)).unwrap();
        assert_eq!(config.extensions, vec![".mts"]);
    }

    #[test]
    fn test_settings_override_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, r#"{"EXTENSIONS": ["MTS", "jpg"]}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.extensions, vec![".mts", ".jpg"]);
    }

    #[test]
    fn test_invalid_settings_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "not json").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.extensions, vec![".mts"]);
    }

    #[test]
    fn test_empty_extension_list_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, r#"{"EXTENSIONS": []}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.extensions, vec![".mts"]);
    }
}
