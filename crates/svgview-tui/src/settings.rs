//! Persistent user settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the settings directory under the platform config dir.
const APP_DIR: &str = "svgview";

/// User settings stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Command used to open documents. Falls back to `$VISUAL`, `$EDITOR`,
    /// then the system opener.
    pub editor: Option<String>,
    /// Locale handed to the gallery bundle.
    pub locale: String,
    /// Directory holding the gallery bundle. Defaults to the data dir.
    pub asset_dir: Option<PathBuf>,
    /// Folders browsed when no path is given.
    pub workspace_folders: Vec<PathBuf>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            editor: None,
            locale: "en".to_string(),
            asset_dir: None,
            workspace_folders: Vec::new(),
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`. Missing or invalid files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk.
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No config directory")
        })?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating its parent directory.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }

    /// Directory of the gallery bundle.
    pub fn resolved_asset_dir(&self) -> PathBuf {
        self.asset_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(APP_DIR))
    }
}

/// Directory rendered galleries and logs are written to.
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/settings.toml");

        let settings = UserSettings {
            editor: Some("hx".to_string()),
            locale: "zh-cn".to_string(),
            asset_dir: Some(PathBuf::from("/opt/svgview")),
            workspace_folders: vec![PathBuf::from("/work/site")],
        };
        settings.save_to(&path).unwrap();

        assert_eq!(UserSettings::load_from(&path), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "editor = \"nano\"\n").unwrap();

        let settings = UserSettings::load_from(&path);
        assert_eq!(settings.editor.as_deref(), Some("nano"));
        assert_eq!(settings.locale, "en");
        assert!(settings.workspace_folders.is_empty());
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "locale = [").unwrap();
        assert_eq!(UserSettings::load_from(&path), UserSettings::default());
        assert_eq!(
            UserSettings::load_from(&temp.path().join("missing.toml")),
            UserSettings::default()
        );
    }

    #[test]
    fn test_explicit_asset_dir_wins() {
        let settings = UserSettings {
            asset_dir: Some(PathBuf::from("/opt/svgview")),
            ..Default::default()
        };
        assert_eq!(settings.resolved_asset_dir(), PathBuf::from("/opt/svgview"));
    }
}
