//! Monitor settings

use std::path::PathBuf;

use rds_sim::VirtualStationConfig;
use serde::{Deserialize, Serialize};

/// How decoded station state is printed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One summary line per state change
    #[default]
    Text,
    /// One JSON object per state change
    Json,
}

/// Monitor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Default output mode
    #[serde(default)]
    pub output: OutputMode,
    /// Print an annotation line for every group
    #[serde(default)]
    pub annotate: bool,
    /// Station used by `--simulate`
    #[serde(default)]
    pub station: VirtualStationConfig,
    /// Tracing filter used when `RUST_LOG` is not set
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: OutputMode::Text,
            annotate: false,
            station: VirtualStationConfig::default(),
            log_filter: None,
        }
    }
}

impl Settings {
    /// Get the XDG config directory for rds-monitor
    /// Uses $XDG_CONFIG_HOME/rds-monitor, falls back to ~/.config/rds-monitor
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("rds-monitor"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("rds-monitor"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .map(|s| Self::from_json(&s))
            .unwrap_or_default()
    }

    /// Parse settings JSON; anything unreadable yields the defaults
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path =
            Self::settings_path().ok_or_else(|| "Could not determine settings path".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, json).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output, OutputMode::Text);
        assert!(!settings.annotate);
        assert_eq!(settings.station, VirtualStationConfig::default());
        assert!(settings.log_filter.is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            output: OutputMode::Json,
            annotate: true,
            log_filter: Some("rds_protocol=debug".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("\"output\": \"json\""));
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{ "annotate": true }"#);
        assert!(settings.annotate);
        assert_eq!(settings.output, OutputMode::Text);
        assert_eq!(settings.station.pi, 0x6201);
    }

    #[test]
    fn test_unreadable_json_uses_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
        assert_eq!(
            Settings::from_json(r#"{ "output": "xml" }"#),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_path_name() {
        if let Some(path) = Settings::settings_path() {
            assert!(path.ends_with("rds-monitor/settings.json"));
        }
    }
}
