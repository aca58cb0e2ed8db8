//! Workspace configuration
//!
//! Resolves the two settings layers into one configuration per workspace:
//! 1. Global settings (~/.config/remote/defaults.toml)
//! 2. Local settings (<workspace>/.remote.toml), overwriting or extending
//!    the global ones per category

mod error;
mod loader;
mod medium;
mod merge;
mod paths;
mod provider;
mod resolved;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::{
    load_global_settings, load_local_settings, local_settings_path, save_global_settings,
    save_local_settings,
};
pub use medium::ConfigMedium;
pub use merge::{
    check_conflicts, default_index, merge_hosts, merge_ignores, merge_rules, EffectiveRules,
    MergedHosts,
};
pub use paths::{generated_directory, hash_path, resolve_directories};
pub use provider::GlobalSettingsProvider;
pub use resolved::{ResolvedConfig, ResolvedHost, SyncIgnores};
