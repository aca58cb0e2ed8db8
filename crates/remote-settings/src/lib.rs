//! Remote Settings Types
//!
//! Defines the two settings layers of a remote workspace (user-wide global
//! defaults and the per-workspace local file) and the validator that turns
//! parsed TOML tables into them.

pub mod error;
pub mod types;
pub mod validate;

pub use error::{SchemaValidationError, Violation};
pub use types::{
    Category, ExtendsBlock, GeneralSettings, GlobalSettings, HostEntry, LocalSettings, RuleSet,
};
pub use validate::{validate_global, validate_local};

/// Global settings file, relative to the user's home directory.
pub const GLOBAL_CONFIG: &str = ".config/remote/defaults.toml";

/// Local settings file name inside a workspace root.
pub const WORKSPACE_CONFIG: &str = ".remote.toml";

/// VCS ignore file harvested when a rule set asks for it.
pub const VCS_IGNORE_FILE: &str = ".gitignore";

/// Remote root used when `general.remote_root` is not set.
pub const DEFAULT_REMOTE_ROOT: &str = ".remotes";

/// Shell used on the remote side when a host does not name one.
pub const DEFAULT_SHELL: &str = "sh";
