use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Stores references to all the paths relevant to dockbar, and abstracts access to these files and directories
#[derive(Debug, Clone)]
pub struct DockbarPaths {
    pub config_dir: PathBuf,
}

impl DockbarPaths {
    /// The directory does not need to exist, a bar without user configuration uses the built-in style.
    pub fn from_config_dir<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        if config_dir.is_file() {
            bail!("Please provide the path to the config directory, not a file within it")
        }
        Ok(DockbarPaths { config_dir: config_dir.to_path_buf() })
    }

    pub fn default() -> Result<Self> {
        let config_dir = match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from(std::env::var("HOME").context("Neither XDG_CONFIG_HOME nor HOME is set")?).join(".config"),
        };

        Self::from_config_dir(config_dir.join("dockbar"))
    }

    pub fn get_scss_path(&self) -> PathBuf {
        self.config_dir.join("dockbar.scss")
    }
}

impl std::fmt::Display for DockbarPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config-dir: {}", self.config_dir.display())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scss_path() {
        let paths = DockbarPaths::from_config_dir("/nonexistent/dockbar").unwrap();
        assert_eq!(PathBuf::from("/nonexistent/dockbar/dockbar.scss"), paths.get_scss_path());
    }

    #[test]
    fn test_rejects_file_as_config_dir() {
        let file = std::env::current_exe().unwrap();
        assert!(DockbarPaths::from_config_dir(file).is_err());
    }
}
