//! Resolved workspace configuration
//!
//! The fully merged view of one workspace, handed to the sync executor.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use remote_settings::{HostEntry, DEFAULT_SHELL};

use crate::exclude::ExcludeSet;

/// A remote host with a concrete directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedHost {
    /// Host name or address
    pub host: String,

    /// Remote directory the workspace maps to
    pub directory: PathBuf,

    /// SSH port, transport default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Shell used to run commands remotely
    pub shell: String,

    /// Extra options passed to the remote shell
    pub shell_options: String,
}

impl ResolvedHost {
    /// Host with default connection settings.
    pub fn new(host: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            directory: directory.into(),
            port: None,
            shell: DEFAULT_SHELL.to_string(),
            shell_options: String::new(),
        }
    }

    /// Resolve a settings entry against an already computed directory.
    pub(crate) fn from_entry(entry: HostEntry, directory: PathBuf) -> Self {
        Self {
            host: entry.host,
            directory,
            port: entry.port,
            shell: entry.shell.unwrap_or_else(|| DEFAULT_SHELL.to_string()),
            shell_options: entry.shell_options.unwrap_or_default(),
        }
    }

    /// Settings entry for writing back to the local file.
    pub(crate) fn to_entry(&self, default: bool) -> HostEntry {
        HostEntry {
            host: self.host.clone(),
            directory: Some(self.directory.clone()),
            default,
            port: self.port,
            shell: (self.shell != DEFAULT_SHELL).then(|| self.shell.clone()),
            shell_options: (!self.shell_options.is_empty()).then(|| self.shell_options.clone()),
        }
    }
}

/// Exclude patterns per sync direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncIgnores {
    /// Excluded when pushing to the remote
    pub push: Vec<String>,
    /// Excluded when pulling from the remote
    pub pull: Vec<String>,
    /// Excluded in both directions
    pub both: Vec<String>,
}

impl SyncIgnores {
    /// Everything excluded from a push.
    pub fn for_push(&self) -> Vec<String> {
        Self::combine(&self.push, &self.both)
    }

    /// Everything excluded from a pull.
    pub fn for_pull(&self) -> Vec<String> {
        Self::combine(&self.pull, &self.both)
    }

    fn combine(direction: &[String], both: &[String]) -> Vec<String> {
        direction
            .iter()
            .chain(both)
            .cloned()
            .collect::<ExcludeSet>()
            .into_vec()
    }
}

/// Fully resolved configuration of one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Absolute workspace root
    pub root: PathBuf,

    /// Remote hosts in resolution order, never empty
    pub hosts: Vec<ResolvedHost>,

    /// Index into `hosts` of the default host
    pub default_index: usize,

    /// Exclude patterns per direction
    pub ignores: SyncIgnores,
}

impl ResolvedConfig {
    /// The host used when none is chosen explicitly.
    pub fn default_host(&self) -> Option<&ResolvedHost> {
        self.hosts.get(self.default_index)
    }

    /// Serialize to JSON for the sync executor.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
