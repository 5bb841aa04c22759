//! Global settings of the dataset loaders.
//!
//! Default source URLs live here rather than at call sites so that tests and
//! offline users can point the loaders at local copies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, RwLock};

use crate::error::{Result, UpliftError};
use crate::utility::get_file_path;

/// Public copy of the Hillstrom MineThatData e-mail challenge
pub const DEFAULT_HILLSTROM_URL: &str =
    "http://www.minethatdata.com/Kevin_Hillstrom_MineThatData_E-MailAnalytics_DataMiningChallenge_2008.03.20.csv";

/// Criteo uplift prediction dataset v2.1
pub const DEFAULT_CRITEO_URL: &str =
    "https://go.criteo.net/criteo-research-uplift-v2.1.csv.gz";

/// Default settings
fn default_settings() -> HashMap<String, SettingValue> {
    let mut settings = HashMap::new();

    // Sources
    settings.insert("hillstrom.url".to_string(), SettingValue::String(DEFAULT_HILLSTROM_URL.to_string()));
    settings.insert("criteo.url".to_string(), SettingValue::String(DEFAULT_CRITEO_URL.to_string()));

    // HTTP
    settings.insert("http.timeout".to_string(), SettingValue::Int(300));

    // Log settings
    settings.insert("log.level".to_string(), SettingValue::Int(20)); // INFO level
    settings.insert("log.console".to_string(), SettingValue::Bool(true));
    settings.insert("log.file".to_string(), SettingValue::Bool(false));

    settings
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl SettingValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Settings container
pub struct Settings {
    settings: RwLock<HashMap<String, SettingValue>>,
}

impl Settings {
    /// Create settings from the defaults overlaid with the settings file, if any
    pub fn new() -> Self {
        let settings = Self::with_defaults();
        if let Some(file_settings) = load_settings_from_file() {
            settings.update(file_settings);
        }
        settings
    }

    /// Create settings from the built-in defaults only
    pub fn with_defaults() -> Self {
        Self {
            settings: RwLock::new(default_settings()),
        }
    }

    /// Create settings from the defaults overlaid with a specific JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UpliftError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let overrides: HashMap<String, SettingValue> = serde_json::from_str(&content)
            .map_err(|e| UpliftError::Config(format!("failed to parse {}: {}", path.display(), e)))?;

        let settings = Self::with_defaults();
        settings.update(overrides);
        Ok(settings)
    }

    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.settings.read().ok()?.get(key).cloned()
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_int())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    pub fn set(&self, key: impl Into<String>, value: SettingValue) {
        if let Ok(mut settings) = self.settings.write() {
            settings.insert(key.into(), value);
        }
    }

    /// Update settings from a map
    pub fn update(&self, new_settings: HashMap<String, SettingValue>) {
        if let Ok(mut settings) = self.settings.write() {
            settings.extend(new_settings);
        }
    }

    /// Default Hillstrom source location
    pub fn hillstrom_url(&self) -> String {
        self.get_string("hillstrom.url")
            .unwrap_or_else(|| DEFAULT_HILLSTROM_URL.to_string())
    }

    /// Default Criteo source location
    pub fn criteo_url(&self) -> String {
        self.get_string("criteo.url")
            .unwrap_or_else(|| DEFAULT_CRITEO_URL.to_string())
    }

    /// HTTP timeout in seconds
    pub fn http_timeout(&self) -> u64 {
        self.get_int("http.timeout")
            .filter(|secs| *secs > 0)
            .map(|secs| secs as u64)
            .unwrap_or(300)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Setting filename
pub const SETTING_FILENAME: &str = "uplift_setting.json";

fn load_settings_from_file() -> Option<HashMap<String, SettingValue>> {
    let filepath = get_file_path(SETTING_FILENAME);
    if filepath.exists() {
        let content = fs::read_to_string(filepath).ok()?;
        serde_json::from_str(&content).ok()
    } else {
        None
    }
}

/// Global settings instance
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new);
