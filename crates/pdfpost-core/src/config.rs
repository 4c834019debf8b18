use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::action::Action;

/// Default upload limit per file (5 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Endpoint paths relative to `base_url` (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub compress: String,
    pub image_to_pdf: String,
    pub merge: String,
    pub split: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            compress: Action::Compress.default_endpoint().to_string(),
            image_to_pdf: Action::ImageToPdf.default_endpoint().to_string(),
            merge: Action::Merge.default_endpoint().to_string(),
            split: Action::Split.default_endpoint().to_string(),
        }
    }
}

impl EndpointConfig {
    /// Endpoint path configured for `action`.
    pub fn path_for(&self, action: Action) -> &str {
        match action {
            Action::Compress => &self.compress,
            Action::ImageToPdf => &self.image_to_pdf,
            Action::Merge => &self.merge,
            Action::Split => &self.split,
        }
    }
}

/// Global configuration loaded from `~/.config/pdfpost/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfpostConfig {
    /// Base URL of the PDF service; endpoint paths are joined onto it.
    pub base_url: String,
    /// Maximum size of a single selected file in bytes.
    pub max_file_bytes: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds (upload, processing and download).
    pub request_timeout_secs: u64,
    /// Directory for saved results (None = current directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Optional endpoint overrides; if missing, built-in paths are used.
    #[serde(default)]
    pub endpoints: Option<EndpointConfig>,
}

impl Default for PdfpostConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/".to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            connect_timeout_secs: 15,
            request_timeout_secs: 300,
            output_dir: None,
            endpoints: None,
        }
    }
}

impl PdfpostConfig {
    /// Endpoint path for `action`, honouring the `[endpoints]` section when present.
    pub fn endpoint_path(&self, action: Action) -> &str {
        match &self.endpoints {
            Some(e) => e.path_for(action),
            None => action.default_endpoint(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pdfpost")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PdfpostConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<PdfpostConfig> {
    if !path.exists() {
        let default_cfg = PdfpostConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: PdfpostConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
