//! Global/local settings merge
//!
//! Each category is resolved independently:
//! - Local top-level field: overwrite (global value discarded)
//! - Local `extends` field: hosts append, excludes union
//! - Neither: global value as-is
//!
//! `both` is never extendable. Setting a category as both overwrite and
//! extend is a conflict.

use std::path::Path;
use tracing::debug;

use remote_settings::{
    Category, GlobalSettings, HostEntry, LocalSettings, VCS_IGNORE_FILE, WORKSPACE_CONFIG,
};

use super::error::{ConfigResult, ConfigurationError};
use super::resolved::SyncIgnores;
use crate::exclude::{read_ignore_file, ExcludeSet};

/// Merged host list with its default entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedHosts {
    /// Hosts in resolution order, never empty
    pub hosts: Vec<HostEntry>,
    /// Index of the default host in `hosts`
    pub default_index: usize,
}

/// A rule set after merging, before VCS patterns are harvested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveRules {
    /// Exclude patterns in first-seen order
    pub excludes: ExcludeSet,
    /// Whether to add the workspace's VCS ignore patterns
    pub include_vcs_ignore_patterns: bool,
}

/// Fail if any category is both overwritten and extended in `local`.
///
/// `file` names the local settings file in the error.
pub fn check_conflicts(local: &LocalSettings, file: &Path) -> ConfigResult<()> {
    let fields: Vec<Category> = Category::EXTENDABLE
        .into_iter()
        .filter(|&category| local.overwrites(category) && local.extends(category))
        .collect();

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ConfigurationError::Conflict {
            file: file.to_path_buf(),
            fields,
        })
    }
}

/// Merge host lists and pick the default host.
pub fn merge_hosts(
    global: Option<&GlobalSettings>,
    local: Option<&LocalSettings>,
) -> ConfigResult<MergedHosts> {
    let global_hosts = global.and_then(|g| g.hosts.as_deref()).unwrap_or_default();
    let extends = local
        .and_then(|l| l.extends.as_ref())
        .and_then(|e| e.hosts.as_deref());

    let hosts: Vec<HostEntry> = match (local.and_then(|l| l.hosts.as_ref()), extends) {
        (Some(overwrite), _) => overwrite.clone(),
        (None, Some(extension)) => global_hosts.iter().chain(extension).cloned().collect(),
        (None, None) => global_hosts.to_vec(),
    };

    if hosts.is_empty() {
        return Err(ConfigurationError::NoHosts);
    }

    let default_index = default_index(&hosts);
    debug!(hosts = hosts.len(), default_index, "merged hosts");
    Ok(MergedHosts {
        hosts,
        default_index,
    })
}

/// Index of the last host marked default, or the first host if none is.
pub fn default_index(hosts: &[HostEntry]) -> usize {
    hosts.iter().rposition(|h| h.default).unwrap_or(0)
}

/// Merge one rule category. `Category::Hosts` yields an empty rule set.
pub fn merge_rules(
    category: Category,
    global: Option<&GlobalSettings>,
    local: Option<&LocalSettings>,
) -> EffectiveRules {
    let base = global.and_then(|g| g.rules(category));

    if let Some(overwrite) = local.and_then(|l| l.rules(category)) {
        return EffectiveRules {
            excludes: overwrite.excludes().iter().collect(),
            include_vcs_ignore_patterns: overwrite.include_vcs_ignore_patterns.unwrap_or(false),
        };
    }

    let extension = local
        .and_then(|l| l.extends.as_ref())
        .and_then(|e| e.rules(category));

    let base_excludes = base.map(|b| b.excludes()).unwrap_or_default();
    let base_flag = base.and_then(|b| b.include_vcs_ignore_patterns);

    match extension {
        Some(extension) => EffectiveRules {
            excludes: base_excludes.iter().chain(extension.excludes()).collect(),
            include_vcs_ignore_patterns: extension
                .include_vcs_ignore_patterns
                .or(base_flag)
                .unwrap_or(false),
        },
        None => EffectiveRules {
            excludes: base_excludes.iter().collect(),
            include_vcs_ignore_patterns: base_flag.unwrap_or(false),
        },
    }
}

/// Merge all three rule categories for the workspace at `root`.
///
/// Harvests the workspace's VCS ignore file where requested and always
/// excludes the local settings file from `both`.
pub fn merge_ignores(
    global: Option<&GlobalSettings>,
    local: Option<&LocalSettings>,
    root: &Path,
) -> ConfigResult<SyncIgnores> {
    let mut vcs_patterns: Option<Vec<String>> = None;
    let mut resolved = Vec::with_capacity(Category::RULES.len());

    for category in Category::RULES {
        let mut rules = merge_rules(category, global, local);

        if rules.include_vcs_ignore_patterns {
            if vcs_patterns.is_none() {
                let path = root.join(VCS_IGNORE_FILE);
                let patterns =
                    read_ignore_file(&path).map_err(|e| ConfigurationError::io(&path, e))?;
                debug!(path = %path.display(), count = patterns.len(), "read VCS ignore patterns");
                vcs_patterns = Some(patterns);
            }
            rules.excludes.extend(vcs_patterns.iter().flatten().cloned());
        }

        if category == Category::Both {
            rules.excludes.insert(WORKSPACE_CONFIG);
        }

        resolved.push(rules.excludes.into_vec());
    }

    let mut resolved = resolved.into_iter();
    Ok(SyncIgnores {
        push: resolved.next().unwrap_or_default(),
        pull: resolved.next().unwrap_or_default(),
        both: resolved.next().unwrap_or_default(),
    })
}
