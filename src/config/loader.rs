//! Settings file loading and saving

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use toml::Table;
use tracing::debug;

use remote_settings::{
    validate_global, validate_local, GlobalSettings, LocalSettings, SchemaValidationError,
    WORKSPACE_CONFIG,
};

use super::error::{ConfigResult, ConfigurationError};
use super::merge::check_conflicts;

/// Path of the local settings file for a workspace root.
pub fn local_settings_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_CONFIG)
}

/// Load global settings. A missing file yields the defaults.
pub fn load_global_settings(path: &Path) -> ConfigResult<GlobalSettings> {
    let Some(table) = read_table(path)? else {
        debug!(path = %path.display(), "no global settings file, using defaults");
        return Ok(GlobalSettings::default());
    };

    debug!(path = %path.display(), "loaded global settings");
    validate_global(&table).map_err(|violations| SchemaValidationError::new(path, violations).into())
}

/// Load the local settings of the workspace at `root`.
///
/// A missing file yields empty settings. Categories set both as overwrite and
/// extend are rejected here.
pub fn load_local_settings(root: &Path) -> ConfigResult<LocalSettings> {
    let path = local_settings_path(root);
    let Some(table) = read_table(&path)? else {
        debug!(path = %path.display(), "no local settings file");
        return Ok(LocalSettings::default());
    };

    let settings = validate_local(&table)
        .map_err(|violations| SchemaValidationError::new(&path, violations))?;
    check_conflicts(&settings, &path)?;

    debug!(path = %path.display(), "loaded local settings");
    Ok(settings)
}

/// Replace the local settings file of the workspace at `root`.
pub fn save_local_settings(root: &Path, settings: &LocalSettings) -> ConfigResult<()> {
    let path = local_settings_path(root);
    write_toml(&path, settings)
}

/// Replace the global settings file, creating its directory if needed.
pub fn save_global_settings(path: &Path, settings: &GlobalSettings) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigurationError::io(parent, e))?;
    }
    write_toml(path, settings)
}

/// Read and parse a TOML file, returning `None` if it does not exist.
fn read_table(path: &Path) -> ConfigResult<Option<Table>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigurationError::io(path, e)),
    };

    toml::from_str(&contents)
        .map(Some)
        .map_err(|source| ConfigurationError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn write_toml<T: serde::Serialize>(path: &Path, value: &T) -> ConfigResult<()> {
    let contents = toml::to_string(value)?;
    fs::write(path, contents).map_err(|e| ConfigurationError::io(path, e))?;
    debug!(path = %path.display(), "wrote settings");
    Ok(())
}
