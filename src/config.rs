use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Kiosk configuration, loaded once at startup from a YAML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Configuration {
    /// Base URL of the photo backend, e.g. `http://127.0.0.1:8000`.
    pub backend_url: String,

    /// Path of the photo list endpoint on the backend.
    #[serde(default = "Configuration::default_photos_path")]
    pub photos_path: String,

    /// Path of the upload endpoint on the backend.
    #[serde(default = "Configuration::default_upload_path")]
    pub upload_path: String,

    /// URL encoded into the on-screen QR code for guests to upload photos.
    #[serde(default = "Configuration::default_upload_url")]
    pub upload_url: String,

    /// How long each photo stays on screen before the next crossfade.
    #[serde(
        default = "Configuration::default_rotation_interval",
        with = "humantime_serde"
    )]
    pub rotation_interval: Duration,

    /// How often the backend is polled for list changes.
    #[serde(
        default = "Configuration::default_polling_interval",
        with = "humantime_serde"
    )]
    pub polling_interval: Duration,

    /// Directory for generated artifacts (the upload QR PNG).
    #[serde(default = "Configuration::default_var_dir")]
    pub var_dir: PathBuf,
}

impl Configuration {
    fn default_photos_path() -> String {
        "/api/photos".to_string()
    }

    fn default_upload_path() -> String {
        "/api/upload".to_string()
    }

    fn default_upload_url() -> String {
        "http://photoshare.local".to_string()
    }

    fn default_rotation_interval() -> Duration {
        Duration::from_millis(7000)
    }

    fn default_polling_interval() -> Duration {
        Duration::from_millis(10_000)
    }

    fn default_var_dir() -> PathBuf {
        PathBuf::from("/var/lib/photoshare-kiosk")
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Self = serde_yaml::from_str(&text).context("parsing YAML configuration")?;
        Ok(cfg)
    }

    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://"),
            "backend-url must be an http(s) URL"
        );
        ensure!(
            self.photos_path.starts_with('/'),
            "photos-path must start with '/'"
        );
        ensure!(
            self.upload_path.starts_with('/'),
            "upload-path must start with '/'"
        );
        ensure!(!self.upload_url.is_empty(), "upload-url must not be empty");
        ensure!(
            !self.rotation_interval.is_zero(),
            "rotation-interval must be positive"
        );
        ensure!(
            !self.polling_interval.is_zero(),
            "polling-interval must be positive"
        );
        Ok(self)
    }
}
