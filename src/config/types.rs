use serde::{Deserialize, Serialize};

/// 使用者設定檔的檔名（位於目前工作目錄）
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// 設定檔內容，唯一可設定的項目是副檔名清單
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(rename = "EXTENSIONS", default)]
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 正規化後的副檔名（小寫、含前導點）
    pub extensions: Vec<String>,
}

impl Config {
    /// 以命令列指定的副檔名取代設定值；正規化後為空時沿用設定
    #[must_use]
    pub fn with_extension_overrides(mut self, overrides: &[String]) -> Self {
        let normalized = normalize_extensions(overrides);
        if !normalized.is_empty() {
            self.extensions = normalized;
        }
        self
    }
}

/// 正規化副檔名：`mts`、`.mts`、`.MTS` 都會變成 `.mts`
#[must_use]
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    format!(".{}", trimmed.to_lowercase())
}

/// 正規化並去除空白與重複項目，保留原始順序
#[must_use]
pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(extensions.len());
    for ext in extensions {
        if ext.trim().trim_start_matches('.').is_empty() {
            continue;
        }
        let ext = normalize_extension(ext);
        if !normalized.contains(&ext) {
            normalized.push(ext);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extension_variants() {
        assert_eq!(normalize_extension("mts"), ".mts");
        assert_eq!(normalize_extension(".mts"), ".mts");
        assert_eq!(normalize_extension(".MTS"), ".mts");
        assert_eq!(normalize_extension("  JPG "), ".jpg");
    }

    #[test]
    fn test_normalize_extensions_dedup_and_skip_empty() {
        let input = vec![
            "MTS".to_string(),
            ".mts".to_string(),
            "".to_string(),
            ".".to_string(),
            "mp4".to_string(),
        ];
        assert_eq!(normalize_extensions(&input), vec![".mts", ".mp4"]);
    }

    #[test]
    fn test_with_extension_overrides() {
        let config = Config {
            extensions: vec![".mts".to_string()],
        };
        let unchanged = config.clone().with_extension_overrides(&[]);
        assert_eq!(unchanged.extensions, vec![".mts"]);

        let overridden = config.with_extension_overrides(&["JPG".to_string()]);
        assert_eq!(overridden.extensions, vec![".jpg"]);
    }

    #[test]
    fn test_blank_overrides_keep_configured_extensions() {
        let config = Config {
            extensions: vec![".mts".to_string()],
        };
        let kept = config.with_extension_overrides(&[".".to_string(), "  ".to_string()]);
        assert_eq!(kept.extensions, vec![".mts"]);
    }

    #[test]
    fn test_user_settings_missing_field() {
        let settings: UserSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.extensions.is_none());
    }
}
