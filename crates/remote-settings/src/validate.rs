//! Settings validation.
//!
//! Walks a parsed TOML table, threading the dotted field path through every
//! nested table and array, and collects every violation instead of stopping
//! at the first one. Unknown keys are rejected at every level.

use std::path::PathBuf;
use toml::{Table, Value};

use crate::error::Violation;
use crate::types::{ExtendsBlock, GeneralSettings, GlobalSettings, HostEntry, LocalSettings, RuleSet};

const GLOBAL_KEYS: &[&str] = &["hosts", "push", "pull", "both", "general"];
const LOCAL_KEYS: &[&str] = &["hosts", "push", "pull", "both", "extends"];
const EXTENDS_KEYS: &[&str] = &["hosts", "push", "pull"];
const GENERAL_KEYS: &[&str] = &[
    "allow_uninitiated_workspaces",
    "use_relative_remote_paths",
    "remote_root",
];
const RULE_SET_KEYS: &[&str] = &["exclude", "include_vsc_ignore_patterns"];
const HOST_KEYS: &[&str] = &["host", "directory", "default", "port", "shell", "shell_options"];

const TRUTHY: &[&str] = &["1", "on", "t", "true", "y", "yes"];
const FALSY: &[&str] = &["0", "off", "f", "false", "n", "no"];

/// Validate the contents of the global settings file.
///
/// # Errors
///
/// Returns every violation found, in traversal order.
pub fn validate_global(table: &Table) -> Result<GlobalSettings, Vec<Violation>> {
    let mut v = Validator::default();

    let hosts = table.get("hosts").and_then(|value| v.hosts(value, "hosts"));
    if hosts
        .as_ref()
        .is_some_and(|hosts| hosts.iter().any(|h| h.directory.is_some()))
    {
        v.report("hosts", "cannot specify directory in global host config");
    }

    let settings = GlobalSettings {
        hosts,
        push: v.optional_rule_set(table, "push", ""),
        pull: v.optional_rule_set(table, "pull", ""),
        both: v.optional_rule_set(table, "both", ""),
        general: table
            .get("general")
            .and_then(|value| v.general(value, "general"))
            .unwrap_or_default(),
    };
    v.reject_unknown(table, GLOBAL_KEYS, "");

    v.finish(settings)
}

/// Validate the contents of a workspace's local settings file.
///
/// # Errors
///
/// Returns every violation found, in traversal order.
pub fn validate_local(table: &Table) -> Result<LocalSettings, Vec<Violation>> {
    let mut v = Validator::default();

    let settings = LocalSettings {
        hosts: table.get("hosts").and_then(|value| v.hosts(value, "hosts")),
        push: v.optional_rule_set(table, "push", ""),
        pull: v.optional_rule_set(table, "pull", ""),
        both: v.optional_rule_set(table, "both", ""),
        extends: table
            .get("extends")
            .and_then(|value| v.extends(value, "extends")),
    };
    v.reject_unknown(table, LOCAL_KEYS, "");

    v.finish(settings)
}

fn child(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[derive(Default)]
struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    fn finish<T>(self, value: T) -> Result<T, Vec<Violation>> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(self.violations)
        }
    }

    fn report(&mut self, field: &str, message: &str) {
        self.violations.push(Violation::new(field, message));
    }

    fn reject_unknown(&mut self, table: &Table, known: &[&str], prefix: &str) {
        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                self.report(&child(prefix, key), "extra fields not permitted");
            }
        }
    }

    fn table<'v>(&mut self, value: &'v Value, field: &str) -> Option<&'v Table> {
        match value {
            Value::Table(table) => Some(table),
            _ => {
                self.report(field, "value is not a valid dict");
                None
            }
        }
    }

    fn boolean(&mut self, value: &Value, field: &str) -> Option<bool> {
        let parsed = match value {
            Value::Boolean(b) => Some(*b),
            Value::Integer(0) => Some(false),
            Value::Integer(1) => Some(true),
            Value::String(s) => {
                let s = s.trim().to_lowercase();
                if TRUTHY.contains(&s.as_str()) {
                    Some(true)
                } else if FALSY.contains(&s.as_str()) {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        };
        if parsed.is_none() {
            self.report(field, "value could not be parsed to a boolean");
        }
        parsed
    }

    fn string(&mut self, value: &Value, field: &str) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            _ => {
                self.report(field, "str type expected");
                None
            }
        }
    }

    fn string_list(&mut self, value: &Value, field: &str) -> Option<Vec<String>> {
        let Value::Array(items) = value else {
            self.report(field, "value is not a valid list");
            return None;
        };

        let before = self.violations.len();
        let list: Vec<String> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.string(item, &child(field, &i.to_string())))
            .collect();
        (self.violations.len() == before).then_some(list)
    }

    fn port(&mut self, value: &Value, field: &str) -> Option<u16> {
        let number = match value {
            Value::Integer(i) => Some(*i),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        let Some(number) = number else {
            self.report(field, "value is not a valid integer");
            return None;
        };
        match u16::try_from(number) {
            Ok(port) if port > 0 => Some(port),
            _ => {
                self.report(field, "ensure this value is between 1 and 65535");
                None
            }
        }
    }

    fn optional_rule_set(&mut self, table: &Table, key: &str, prefix: &str) -> Option<RuleSet> {
        let field = child(prefix, key);
        table.get(key).and_then(|value| self.rule_set(value, &field))
    }

    fn rule_set(&mut self, value: &Value, field: &str) -> Option<RuleSet> {
        let table = self.table(value, field)?;
        let before = self.violations.len();

        let rules = RuleSet {
            exclude: table
                .get("exclude")
                .and_then(|v| self.string_list(v, &child(field, "exclude"))),
            include_vcs_ignore_patterns: table
                .get("include_vsc_ignore_patterns")
                .and_then(|v| self.boolean(v, &child(field, "include_vsc_ignore_patterns"))),
        };
        self.reject_unknown(table, RULE_SET_KEYS, field);

        (self.violations.len() == before).then_some(rules)
    }

    fn host(&mut self, value: &Value, field: &str) -> Option<HostEntry> {
        let table = self.table(value, field)?;
        let before = self.violations.len();

        let host = match table.get("host") {
            Some(v) => self.string(v, &child(field, "host")),
            None => {
                self.report(&child(field, "host"), "field required");
                None
            }
        };
        if host.as_deref() == Some("") {
            self.report(&child(field, "host"), "ensure this value has at least 1 characters");
        }

        let directory = table
            .get("directory")
            .and_then(|v| self.string(v, &child(field, "directory")))
            .map(PathBuf::from);
        let default = table
            .get("default")
            .and_then(|v| self.boolean(v, &child(field, "default")))
            .unwrap_or(false);
        let port = table
            .get("port")
            .and_then(|v| self.port(v, &child(field, "port")));
        let shell = table
            .get("shell")
            .and_then(|v| self.string(v, &child(field, "shell")));
        let shell_options = table
            .get("shell_options")
            .and_then(|v| self.string(v, &child(field, "shell_options")));
        self.reject_unknown(table, HOST_KEYS, field);

        if self.violations.len() != before {
            return None;
        }
        Some(HostEntry {
            host: host?,
            directory,
            default,
            port,
            shell,
            shell_options,
        })
    }

    fn hosts(&mut self, value: &Value, field: &str) -> Option<Vec<HostEntry>> {
        let Value::Array(items) = value else {
            self.report(field, "value is not a valid list");
            return None;
        };

        let before = self.violations.len();
        let hosts: Vec<HostEntry> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.host(item, &child(field, &i.to_string())))
            .collect();
        (self.violations.len() == before).then_some(hosts)
    }

    fn general(&mut self, value: &Value, field: &str) -> Option<GeneralSettings> {
        let table = self.table(value, field)?;
        let defaults = GeneralSettings::default();

        let general = GeneralSettings {
            allow_uninitiated_workspaces: table
                .get("allow_uninitiated_workspaces")
                .and_then(|v| self.boolean(v, &child(field, "allow_uninitiated_workspaces")))
                .unwrap_or(defaults.allow_uninitiated_workspaces),
            use_relative_remote_paths: table
                .get("use_relative_remote_paths")
                .and_then(|v| self.boolean(v, &child(field, "use_relative_remote_paths")))
                .unwrap_or(defaults.use_relative_remote_paths),
            remote_root: table
                .get("remote_root")
                .and_then(|v| self.string(v, &child(field, "remote_root")))
                .unwrap_or(defaults.remote_root),
        };
        self.reject_unknown(table, GENERAL_KEYS, field);

        Some(general)
    }

    fn extends(&mut self, value: &Value, field: &str) -> Option<ExtendsBlock> {
        let table = self.table(value, field)?;

        let block = ExtendsBlock {
            hosts: table
                .get("hosts")
                .and_then(|v| self.hosts(v, &child(field, "hosts"))),
            push: self.optional_rule_set(table, "push", field),
            pull: self.optional_rule_set(table, "pull", field),
        };
        self.reject_unknown(table, EXTENDS_KEYS, field);

        Some(block)
    }
}
