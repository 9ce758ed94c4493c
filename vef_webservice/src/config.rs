use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, trace};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use vef_forms::FormOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),
    #[error("error reading configuration file: {0}")]
    Read(#[from] std::io::Error),
    #[error("error parsing configuration file: {0}")]
    Deserialization(String),
    #[error("unsupported configuration file extension")]
    UnsupportedFileExtension,
}

/// Settings of one application window and the server behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Root for uploads, the browser profile and `web/` overrides.
    pub workspace: PathBuf,
    /// Keep serving after the console socket closes and open devtools.
    pub debug: bool,
    pub lang: String,
    /// Initial and minimum window size, `[width, height]`.
    pub size: (u32, u32),
    pub position: (i32, i32),
    /// Client text overrides, passed through untouched.
    pub messages: Map<String, Value>,
    pub port: u16,
    /// Browser executable; searched for when unset.
    pub chrome_path: Option<PathBuf>,
    pub chrome_flags: Vec<String>,
    pub open_browser: bool,
    pub form: FormOptions,
    pub log4rs_config: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "UnTitled".to_string(),
            workspace: default_workspace(),
            debug: false,
            lang: "en".to_string(),
            size: (640, 720),
            position: (320, 200),
            messages: Map::new(),
            port: 9030,
            chrome_path: None,
            chrome_flags: Vec::new(),
            open_browser: true,
            form: FormOptions::default(),
            log4rs_config: None,
        }
    }
}

impl AppConfig {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            title: if title.is_empty() {
                "UnTitled".to_string()
            } else {
                title
            },
            ..Self::default()
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.workspace.join("upload")
    }

    pub fn browser_profile_dir(&self) -> PathBuf {
        self.workspace.join("chrome")
    }

    pub fn web_dir(&self) -> PathBuf {
        self.workspace.join("web")
    }
}

/// Directory holding the running executable, or the current directory when
/// that cannot be determined.
fn default_workspace() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load an [`AppConfig`] from YAML, JSON or TOML, chosen by file extension.
pub fn load_config_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!("Loading config from: {:?}", path);
    trace!("File extension: {:?}", path.extension());

    if !path.exists() {
        error!("Configuration file not found at {:?}", path);
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    trace!("Content read from config file: \n{}", contents);

    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => {
            debug!("Parsing as YAML");
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Deserialization(e.to_string()))
        }
        Some("json") => {
            debug!("Parsing as JSON");
            serde_json::from_str(&contents).map_err(|e| ConfigError::Deserialization(e.to_string()))
        }
        Some("toml") => {
            debug!("Parsing as TOML");
            toml::from_str(&contents).map_err(|e| ConfigError::Deserialization(e.to_string()))
        }
        _ => {
            error!("Unsupported config file format: {:?}", path.extension());
            Err(ConfigError::UnsupportedFileExtension)
        }
    }
}
