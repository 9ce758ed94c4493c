//! Opening the application window in a Chrome-family browser.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use log::{debug, info};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("no Chrome or Chromium executable found; set chrome_path")]
    NotFound,
    #[error("failed to start browser {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Command line flags for the application window, without the URL.
pub fn window_flags(config: &AppConfig) -> Vec<String> {
    let (x, y) = config.position;
    let (width, height) = config.size;
    let mut flags = vec![
        format!("--window-position={},{}", x, y),
        format!("--window-size={},{}", width, height),
        "--new-window".to_string(),
        format!("--user-data-dir={}", absolute(&config.browser_profile_dir()).display()),
        "--disable-windows10-custom-titlebar".to_string(),
    ];
    flags.extend(
        config
            .chrome_flags
            .iter()
            .filter(|flag| !flag.trim().is_empty())
            .cloned(),
    );
    if config.debug {
        flags.push("--auto-open-devtools-for-tabs".to_string());
    }
    flags
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Locate a Chrome or Chromium executable in the usual install locations and
/// on `PATH`.
pub fn find_chrome() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if cfg!(target_os = "windows") {
        for root in ["PROGRAMFILES", "PROGRAMFILES(X86)", "LOCALAPPDATA"] {
            if let Some(dir) = std::env::var_os(root) {
                candidates.push(PathBuf::from(dir).join(r"Google\Chrome\Application\chrome.exe"));
            }
        }
    } else if cfg!(target_os = "macos") {
        candidates.push(PathBuf::from(
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        ));
        candidates.push(PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"));
    }

    let names: &[&str] = if cfg!(target_os = "windows") {
        &["chrome.exe"]
    } else {
        &["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"]
    };
    if let Some(path) = std::env::var_os("PATH") {
        for dir in std::env::split_paths(&path) {
            candidates.extend(names.iter().map(|name| dir.join(name)));
        }
    }

    candidates.into_iter().find(|candidate| candidate.is_file())
}

/// Open `url` as an app window. The browser outlives this call.
pub fn launch(config: &AppConfig, url: &str) -> Result<Child, BrowserError> {
    let path = config
        .chrome_path
        .clone()
        .or_else(find_chrome)
        .ok_or(BrowserError::NotFound)?;

    let mut args = window_flags(config);
    args.push(format!("--app={}", url));
    debug!("Launching {:?} with {:?}", path, args);

    let child = Command::new(&path)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| BrowserError::Spawn {
            path: path.clone(),
            source,
        })?;
    info!("Browser window opened at {}", url);
    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_flags() {
        let config = AppConfig {
            workspace: PathBuf::from("/opt/hello"),
            size: (800, 600),
            position: (10, 20),
            chrome_flags: vec!["--incognito".into(), " ".into()],
            ..AppConfig::default()
        };
        assert_eq!(
            window_flags(&config),
            vec![
                "--window-position=10,20",
                "--window-size=800,600",
                "--new-window",
                "--user-data-dir=/opt/hello/chrome",
                "--disable-windows10-custom-titlebar",
                "--incognito",
            ]
        );
    }

    #[test]
    fn test_debug_opens_devtools() {
        let config = AppConfig {
            debug: true,
            ..AppConfig::default()
        };
        assert_eq!(
            window_flags(&config).last().map(String::as_str),
            Some("--auto-open-devtools-for-tabs")
        );
    }

    #[test]
    fn test_missing_executable_fails_to_spawn() {
        let config = AppConfig {
            chrome_path: Some(PathBuf::from("/nonexistent/chrome")),
            ..AppConfig::default()
        };
        let err = launch(&config, "http://127.0.0.1:9030").unwrap_err();
        assert!(matches!(err, BrowserError::Spawn { .. }));
    }
}
