//! Global settings provider
//!
//! Owns the user-wide settings for one run: loaded lazily on first access,
//! cached afterwards, and replaceable for tests or after an explicit save.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use tracing::debug;

use remote_settings::{GlobalSettings, GLOBAL_CONFIG};

use super::error::{ConfigResult, ConfigurationError};
use super::loader::load_global_settings;

/// Lazily loaded, cached global settings.
#[derive(Debug)]
pub struct GlobalSettingsProvider {
    home: PathBuf,
    path: PathBuf,
    cached: OnceCell<GlobalSettings>,
}

impl GlobalSettingsProvider {
    /// Provider for the current user's home directory.
    pub fn from_home() -> ConfigResult<Self> {
        let home = dirs::home_dir().ok_or(ConfigurationError::HomeDirectory)?;
        Ok(Self::with_home(home))
    }

    /// Provider rooted at an explicit home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            path: home.join(GLOBAL_CONFIG),
            home,
            cached: OnceCell::new(),
        }
    }

    /// Provider that never reads a file and serves `settings` instead.
    pub fn with_settings(home: impl Into<PathBuf>, settings: GlobalSettings) -> Self {
        let mut provider = Self::with_home(home);
        provider.replace(settings);
        provider
    }

    /// Home directory; anchor for relative remote paths.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Location of the global settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Global settings, loading them on first access.
    pub fn get(&self) -> ConfigResult<&GlobalSettings> {
        if let Some(settings) = self.cached.get() {
            return Ok(settings);
        }

        debug!(path = %self.path.display(), "loading global settings");
        let loaded = load_global_settings(&self.path)?;
        Ok(self.cached.get_or_init(|| loaded))
    }

    /// Override the cached settings.
    pub fn replace(&mut self, settings: GlobalSettings) {
        self.cached = OnceCell::from(settings);
    }

    /// Drop the cached settings so the next access re-reads the file.
    pub fn reset(&mut self) {
        self.cached.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_global(home: &Path, text: &str) {
        let path = home.join(GLOBAL_CONFIG);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_path_under_home() {
        let provider = GlobalSettingsProvider::with_home("/home/user");
        assert_eq!(
            provider.path(),
            Path::new("/home/user/.config/remote/defaults.toml")
        );
    }

    #[test]
    fn test_loaded_once_and_cached() {
        let home = tempfile::tempdir().unwrap();
        write_global(home.path(), "[general]\nremote_root = \"first\"\n");

        let mut provider = GlobalSettingsProvider::with_home(home.path());
        assert_eq!(provider.get().unwrap().general.remote_root, "first");

        write_global(home.path(), "[general]\nremote_root = \"second\"\n");
        assert_eq!(provider.get().unwrap().general.remote_root, "first");

        provider.reset();
        assert_eq!(provider.get().unwrap().general.remote_root, "second");
    }

    #[test]
    fn test_replace_skips_file() {
        let home = tempfile::tempdir().unwrap();
        write_global(home.path(), "[general]\nremote_root = \"from-file\"\n");

        let mut settings = GlobalSettings::default();
        settings.general.remote_root = "override".to_string();
        let provider = GlobalSettingsProvider::with_settings(home.path(), settings);

        assert_eq!(provider.get().unwrap().general.remote_root, "override");
    }

    #[test]
    fn test_load_error_not_cached() {
        let home = tempfile::tempdir().unwrap();
        write_global(home.path(), "[general]\nunknown = 1\n");

        let provider = GlobalSettingsProvider::with_home(home.path());
        assert!(provider.get().is_err());

        write_global(home.path(), "[general]\n");
        assert!(provider.get().is_ok());
    }
}
