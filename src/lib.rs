//! Remote Workspace Configuration
//!
//! This crate resolves the configuration of a workspace that is synchronized
//! with one or more remote hosts: which hosts to use, which one is the
//! default, where the workspace lives on each of them, and which files are
//! excluded when pushing, pulling, or both.

pub mod config;
pub mod exclude;

pub use config::{
    ConfigMedium, ConfigResult, ConfigurationError, GlobalSettingsProvider, ResolvedConfig,
    ResolvedHost, SyncIgnores,
};
pub use exclude::ExcludeSet;
pub use remote_settings as settings;
