//! Configuration module for papersearch
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Load settings from an explicit path, the default locations, or defaults.
///
/// Environment overrides are always applied last.
pub fn load(explicit: Option<PathBuf>) -> Result<Settings> {
    let mut settings = match find_settings_file(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    Ok(settings)
}

fn find_settings_file(explicit: Option<PathBuf>) -> Option<PathBuf> {
    // An explicit path must exist; it is not silently skipped
    if let Some(path) = explicit {
        return Some(path);
    }

    if let Ok(path) = std::env::var("PAPERSEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let paths = [
        Some(PathBuf::from("settings.yml")),
        Some(PathBuf::from("config/settings.yml")),
        dirs::config_dir().map(|p| p.join("papersearch/settings.yml")),
    ];

    paths.into_iter().flatten().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Tests that read or write `PAPERSEARCH_*` variables hold this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 3] = ["PAPERSEARCH_DEBUG", "PAPERSEARCH_API_URL", "PAPERSEARCH_TIMEOUT"];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = load(Some(PathBuf::from("/nonexistent/papersearch.yml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let path = std::env::temp_dir().join(format!("papersearch-{}.yml", std::process::id()));
        std::fs::write(&path, "general:\n  debug: true\napi:\n  request_timeout: 5.0\n").unwrap();

        let settings = load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(settings.general.debug);
        assert_eq!(settings.api.request_timeout, 5.0);
        assert_eq!(settings.api.base_url, "http://localhost:12312/api");
    }

    #[test]
    fn test_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("PAPERSEARCH_DEBUG", "true");
        std::env::set_var("PAPERSEARCH_API_URL", "http://papers.internal:8080/api");
        std::env::set_var("PAPERSEARCH_TIMEOUT", "7.5");

        let mut settings = Settings::default();
        settings.merge_env();
        clear_env();

        assert!(settings.general.debug);
        assert_eq!(settings.api.base_url, "http://papers.internal:8080/api");
        assert_eq!(settings.api.request_timeout, 7.5);
    }

    #[test]
    fn test_invalid_env_values_ignored() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("PAPERSEARCH_DEBUG", "yes please");
        std::env::set_var("PAPERSEARCH_TIMEOUT", "soon");

        let mut settings = Settings::default();
        settings.general.debug = true;
        settings.api.request_timeout = 12.0;
        settings.merge_env();
        clear_env();

        // unparseable debug reads as off, unparseable timeout keeps the file value
        assert!(!settings.general.debug);
        assert_eq!(settings.api.request_timeout, 12.0);
        assert_eq!(settings.api.base_url, "http://localhost:12312/api");
    }
}
