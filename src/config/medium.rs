//! Configuration medium
//!
//! Entry point for the rest of the tool: loads the settings layers for a
//! workspace, resolves them, and writes resolved configuration back to the
//! workspace's local file. The global file is never written from here.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use remote_settings::{LocalSettings, RuleSet};

use super::error::ConfigResult;
use super::loader::{load_local_settings, local_settings_path, save_local_settings};
use super::merge::{merge_hosts, merge_ignores};
use super::paths::{absolute_path, generated_directory, resolve_directories};
use super::provider::GlobalSettingsProvider;
use super::resolved::ResolvedConfig;

/// TOML-backed configuration medium.
#[derive(Debug, Clone, Copy)]
pub struct ConfigMedium<'a> {
    global: &'a GlobalSettingsProvider,
}

impl<'a> ConfigMedium<'a> {
    pub fn new(global: &'a GlobalSettingsProvider) -> Self {
        Self { global }
    }

    /// Resolve the configuration of the workspace at `workspace`.
    ///
    /// Relative paths are resolved against the current directory, so the
    /// returned `root` is always absolute.
    ///
    /// # Errors
    ///
    /// Fails on invalid settings files, on categories both overwritten and
    /// extended, when no host is configured, and on I/O errors.
    pub fn load_config(&self, workspace: &Path) -> ConfigResult<ResolvedConfig> {
        let root = absolute_path(workspace);
        let global = self.global.get()?;
        let local = load_local_settings(&root)?;

        let merged = merge_hosts(Some(global), Some(&local))?;
        let ignores = merge_ignores(Some(global), Some(&local), &root)?;
        let hosts = resolve_directories(merged.hosts, &global.general, &root, self.global.home());

        debug!(
            root = %root.display(),
            hosts = hosts.len(),
            default_index = merged.default_index,
            "resolved workspace configuration"
        );
        Ok(ResolvedConfig {
            root,
            hosts,
            default_index: merged.default_index,
            ignores,
        })
    }

    /// Write `config` as the workspace's local settings, replacing the file.
    pub fn save_config(&self, config: &ResolvedConfig) -> ConfigResult<()> {
        let hosts = config
            .hosts
            .iter()
            .enumerate()
            .map(|(i, host)| host.to_entry(i == config.default_index))
            .collect();

        let local = LocalSettings {
            hosts: Some(hosts),
            push: Some(RuleSet::with_excludes(config.ignores.push.iter().cloned())),
            pull: Some(RuleSet::with_excludes(config.ignores.pull.iter().cloned())),
            both: Some(RuleSet::with_excludes(config.ignores.both.iter().cloned())),
            extends: None,
        };

        save_local_settings(&config.root, &local)?;
        info!(path = %local_settings_path(&config.root).display(), "saved workspace configuration");
        Ok(())
    }

    /// Whether `path` is a workspace root.
    ///
    /// True when it holds a local settings file, or when uninitiated
    /// workspaces are allowed globally.
    pub fn is_workspace_root(&self, path: &Path) -> ConfigResult<bool> {
        if local_settings_path(path).exists() {
            return Ok(true);
        }
        Ok(self.global.get()?.general.allow_uninitiated_workspaces)
    }

    /// Find the workspace containing `start`.
    ///
    /// The nearest ancestor (including `start`) with a local settings file
    /// wins. Without one, `start` itself is the workspace if uninitiated
    /// workspaces are allowed.
    pub fn discover_workspace_root(&self, start: &Path) -> ConfigResult<Option<PathBuf>> {
        if let Some(root) = start
            .ancestors()
            .find(|dir| local_settings_path(dir).exists())
        {
            return Ok(Some(root.to_path_buf()));
        }

        if self.global.get()?.general.allow_uninitiated_workspaces {
            return Ok(Some(start.to_path_buf()));
        }
        Ok(None)
    }

    /// Remote directory a host without an explicit one gets for `config`.
    pub fn generate_remote_directory(&self, config: &ResolvedConfig) -> ConfigResult<PathBuf> {
        let global = self.global.get()?;
        Ok(generated_directory(
            &global.general,
            &config.root,
            self.global.home(),
        ))
    }
}
