//! Banner configuration persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Persisted banner configuration: the storage key and the element
/// identifiers the controller looks up. Defaults match the markup the
/// stylesheet ships with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_banner_id")]
    pub banner_id: String,
    #[serde(default = "default_accept_id")]
    pub accept_id: String,
    #[serde(default = "default_decline_id")]
    pub decline_id: String,
    /// Path to config file (not serialized).
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_storage_key() -> String {
    consentry_core::CONSENT_KEY.into()
}
fn default_banner_id() -> String {
    "cookieConsentBanner".into()
}
fn default_accept_id() -> String {
    "acceptCookies".into()
}
fn default_decline_id() -> String {
    "declineCookies".into()
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            banner_id: default_banner_id(),
            accept_id: default_accept_id(),
            decline_id: default_decline_id(),
            config_path: PathBuf::new(),
        }
    }
}

impl BannerConfig {
    /// Load config from a JSON file in `config_dir`, or return defaults.
    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join("banner-config.json");
        let mut config: BannerConfig = std::fs::read_to_string(&config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        config.config_path = config_path;
        config
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&self.config_path, json)
    }
}
