use crate::error::{GalleryError, Result};
use crate::utils::fs;
use std::path::PathBuf;

/// Overrides the default download directory.
pub const DIR_ENV_VAR: &str = "GALLERY_RUNNER_DIR";

/// Runtime settings. Built from defaults and the environment on every start;
/// nothing here is written back to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_download_dir: PathBuf,
}

impl Config {
    /// Resolve settings and make sure the default download directory exists.
    pub fn load() -> Result<Self> {
        let config = Self::resolve(std::env::var_os(DIR_ENV_VAR).map(PathBuf::from))?;
        fs::ensure_dir_exists(&config.default_download_dir)?;
        Ok(config)
    }

    fn resolve(dir_override: Option<PathBuf>) -> Result<Self> {
        let default_download_dir = match dir_override {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => get_default_download_dir()?,
        };

        Ok(Config {
            default_download_dir,
        })
    }
}

fn get_default_download_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join("Downloads").join("gallery-dl-downloads"))
        .ok_or(GalleryError::HomeDirectoryNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_wins() {
        let temp = TempDir::new().unwrap();
        let config = Config::resolve(Some(temp.path().join("out"))).unwrap();
        assert_eq!(config.default_download_dir, temp.path().join("out"));
    }

    #[test]
    fn test_empty_override_falls_back_to_home() {
        if dirs::home_dir().is_none() {
            return;
        }
        let config = Config::resolve(Some(PathBuf::new())).unwrap();
        assert!(config
            .default_download_dir
            .ends_with("Downloads/gallery-dl-downloads"));
    }
}
