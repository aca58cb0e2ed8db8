//! Workspace configuration save tests

mod fixtures;

use std::path::PathBuf;

use fixtures::{strings, TestEnv};
use remote_workspace::config::load_local_settings;
use remote_workspace::settings::{HostEntry, RuleSet};
use remote_workspace::{ConfigMedium, ResolvedConfig, ResolvedHost, SyncIgnores};

fn sample_config(root: PathBuf) -> ResolvedConfig {
    ResolvedConfig {
        root,
        hosts: vec![
            ResolvedHost::new("test-host.example.com", ".remotes/workspace"),
            ResolvedHost::new("other-host.example.com", ".remotes/other-workspace"),
        ],
        default_index: 1,
        ignores: SyncIgnores {
            push: strings(&[".git", "env"]),
            pull: strings(&["src/generated"]),
            both: strings(&[".remote.toml", "build"]),
        },
    }
}

#[test]
fn test_save_writes_local_settings_only() {
    let env = TestEnv::new();
    let provider = env.provider();
    let medium = ConfigMedium::new(&provider);

    medium.save_config(&sample_config(env.workspace())).unwrap();

    assert!(!env.global_path().exists());
    assert!(env.local_path().exists());

    let local = load_local_settings(&env.workspace()).unwrap();
    assert_eq!(
        local.hosts,
        Some(vec![
            HostEntry::new("test-host.example.com").with_directory(".remotes/workspace"),
            HostEntry::new("other-host.example.com")
                .with_directory(".remotes/other-workspace")
                .as_default(),
        ])
    );
    assert_eq!(local.push, Some(RuleSet::with_excludes([".git", "env"])));
    assert_eq!(local.pull, Some(RuleSet::with_excludes(["src/generated"])));
    assert_eq!(local.both, Some(RuleSet::with_excludes([".remote.toml", "build"])));
    assert_eq!(local.extends, None);
}

#[test]
fn test_save_leaves_global_file_untouched() {
    let env = TestEnv::new();
    let global_text = "[[hosts]]\nhost = \"g1\"\n";
    env.write_global(global_text);

    let provider = env.provider();
    ConfigMedium::new(&provider)
        .save_config(&sample_config(env.workspace()))
        .unwrap();

    assert_eq!(std::fs::read_to_string(env.global_path()).unwrap(), global_text);
}

#[test]
fn test_save_layout_order() {
    let env = TestEnv::new();
    let provider = env.provider();
    ConfigMedium::new(&provider)
        .save_config(&sample_config(env.workspace()))
        .unwrap();

    let text = env.read_local();
    let hosts = text.find("[[hosts]]").unwrap();
    let push = text.find("[push]").unwrap();
    let pull = text.find("[pull]").unwrap();
    let both = text.find("[both]").unwrap();

    assert!(hosts < push && push < pull && pull < both);
    assert_eq!(text.matches("[[hosts]]").count(), 2);
    assert_eq!(text.matches("default = true").count(), 1);
}

#[test]
fn test_save_replaces_whole_file() {
    let env = TestEnv::new();
    env.write_local(
        r#"
[[extends.hosts]]
host = "old-host"
directory = "old"

[extends.pull]
exclude = ["old"]
include_vsc_ignore_patterns = true
"#,
    );

    let provider = env.provider();
    ConfigMedium::new(&provider)
        .save_config(&sample_config(env.workspace()))
        .unwrap();

    let text = env.read_local();
    assert!(!text.contains("extends"));
    assert!(!text.contains("old-host"));
    assert!(!text.contains("include_vsc_ignore_patterns"));
}

#[test]
fn test_load_save_is_stable() {
    let env = TestEnv::new();
    env.write_global(
        r#"
[general]
remote_root = "my-remotes"

[[hosts]]
host = "global-host"

[push]
exclude = ["env", ".git"]
"#,
    );
    env.write_local(
        r#"
[[extends.hosts]]
host = "local-host"
directory = ".remotes/workspace"
default = true

[extends.push]
exclude = ["extend"]

[pull]
include_vsc_ignore_patterns = true
"#,
    );
    env.write_vcs_ignore("target\n# comment\n*.log\n");

    let provider = env.provider();
    let medium = ConfigMedium::new(&provider);

    let first = medium.load_config(&env.workspace()).unwrap();
    medium.save_config(&first).unwrap();
    let first_text = env.read_local();

    let second = medium.load_config(&env.workspace()).unwrap();
    medium.save_config(&second).unwrap();
    let second_text = env.read_local();

    let third = medium.load_config(&env.workspace()).unwrap();
    medium.save_config(&third).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(first_text, second_text);
    assert_eq!(second_text, env.read_local());

    assert_eq!(second.default_index, 1);
    assert_eq!(second.ignores.push, strings(&["env", ".git", "extend"]));
    assert_eq!(second.ignores.pull, strings(&["target", "*.log"]));
    assert_eq!(second.ignores.both, strings(&[".remote.toml"]));
}
