//! Settings layer types.
//!
//! Every field a user may leave out is an `Option`, so the merge step can tell
//! "not specified, inherit" apart from "specified as empty, overwrite".

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::DEFAULT_REMOTE_ROOT;

/// A mergeable settings category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hosts,
    Push,
    Pull,
    Both,
}

impl Category {
    /// Categories that carry an exclude rule set, in resolution order.
    pub const RULES: [Category; 3] = [Category::Push, Category::Pull, Category::Both];

    /// Categories that may appear under `extends`.
    pub const EXTENDABLE: [Category; 3] = [Category::Hosts, Category::Push, Category::Pull];

    /// Table name used in the settings files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hosts => "hosts",
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exclude patterns for one sync direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    /// Patterns excluded from sync. `Some(vec![])` is an explicit empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    /// Whether to add the workspace's VCS ignore patterns to the excludes.
    #[serde(
        rename = "include_vsc_ignore_patterns",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_vcs_ignore_patterns: Option<bool>,
}

impl RuleSet {
    /// Rule set with the given excludes and no harvesting preference.
    pub fn with_excludes<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: Some(patterns.into_iter().map(Into::into).collect()),
            include_vcs_ignore_patterns: None,
        }
    }

    /// Excludes, treating an unspecified list as empty.
    pub fn excludes(&self) -> &[String] {
        self.exclude.as_deref().unwrap_or_default()
    }
}

/// One remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostEntry {
    /// Host name or address passed to the transport.
    pub host: String,

    /// Remote directory for this workspace. Forbidden in global settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Marks the host used when none is chosen explicitly.
    #[serde(skip_serializing_if = "is_false")]
    pub default: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_options: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl HostEntry {
    /// Host with no directory and no connection overrides.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            directory: None,
            default: false,
            port: None,
            shell: None,
            shell_options: None,
        }
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }
}

/// The `[general]` table of the global settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralSettings {
    /// Treat every directory as a workspace, even without a local file.
    pub allow_uninitiated_workspaces: bool,

    /// Mirror the workspace's home-relative path under `remote_root`.
    pub use_relative_remote_paths: bool,

    /// Remote directory that generated workspace directories live under.
    pub remote_root: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            allow_uninitiated_workspaces: false,
            use_relative_remote_paths: false,
            remote_root: DEFAULT_REMOTE_ROOT.to_string(),
        }
    }
}

/// The `[extends]` table of the local settings. `both` is never extendable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtendsBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<HostEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<RuleSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull: Option<RuleSet>,
}

impl ExtendsBlock {
    /// Rule set extension for a category, if any.
    pub fn rules(&self, category: Category) -> Option<&RuleSet> {
        match category {
            Category::Push => self.push.as_ref(),
            Category::Pull => self.pull.as_ref(),
            Category::Hosts | Category::Both => None,
        }
    }

    /// Whether the category is present in this block.
    pub fn has(&self, category: Category) -> bool {
        match category {
            Category::Hosts => self.hosts.is_some(),
            other => self.rules(other).is_some(),
        }
    }
}

/// User-wide defaults shared across all workspaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<HostEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<RuleSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull: Option<RuleSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub both: Option<RuleSet>,

    pub general: GeneralSettings,
}

impl GlobalSettings {
    pub fn rules(&self, category: Category) -> Option<&RuleSet> {
        match category {
            Category::Push => self.push.as_ref(),
            Category::Pull => self.pull.as_ref(),
            Category::Both => self.both.as_ref(),
            Category::Hosts => None,
        }
    }
}

/// Per-workspace overrides, stored in the workspace root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<HostEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<RuleSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull: Option<RuleSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub both: Option<RuleSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<ExtendsBlock>,
}

impl LocalSettings {
    pub fn rules(&self, category: Category) -> Option<&RuleSet> {
        match category {
            Category::Push => self.push.as_ref(),
            Category::Pull => self.pull.as_ref(),
            Category::Both => self.both.as_ref(),
            Category::Hosts => None,
        }
    }

    /// Whether the category is set as a top-level (overwriting) field.
    pub fn overwrites(&self, category: Category) -> bool {
        match category {
            Category::Hosts => self.hosts.is_some(),
            other => self.rules(other).is_some(),
        }
    }

    /// Whether the category is set under `extends`.
    pub fn extends(&self, category: Category) -> bool {
        self.extends
            .as_ref()
            .is_some_and(|block| block.has(category))
    }
}
