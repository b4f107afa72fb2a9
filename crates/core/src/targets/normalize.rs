use std::path::Path;

use crate::types::{RawSetting, Target};

/// Apply defaults to a raw setting
///
/// `env` defaults to an empty map, `args` to an empty list, a missing or
/// empty `cwd` to the project path being refreshed, `sh` to `true` and
/// `error_match` to the empty pattern. The input is left untouched.
pub fn normalize(cwd: &Path, raw: &RawSetting) -> Target {
    Target {
        name: raw.name.clone(),
        exec: raw.exec.clone(),
        args: raw.args.clone().unwrap_or_default(),
        env: raw.env.clone().unwrap_or_default(),
        cwd: raw
            .cwd
            .clone()
            .filter(|c| !c.as_os_str().is_empty())
            .unwrap_or_else(|| cwd.to_path_buf()),
        sh: raw.sh.unwrap_or(true),
        error_match: raw.error_match.clone().unwrap_or_default(),
        function_match: raw.function_match.clone(),
        warning_match: raw.warning_match.clone(),
        command_name: raw.command_name.clone(),
        keymap: raw.keymap.clone(),
        kill_signals: raw.kill_signals.clone(),
        hooks: raw.hooks.clone(),
    }
}

/// Trigger command identifier for a target without an explicit one
pub fn trigger_command_name(namespace: &str, target_name: &str) -> String {
    format!("{namespace}:trigger:{target_name}")
}

/// Give every keymapped target a trigger command name
///
/// A keybinding has to point at a command, so targets declaring a `keymap`
/// without a `command_name` get `"<namespace>:trigger:<name>"`. Targets that
/// already name a command are left alone.
pub fn synthesize_command_names(namespace: &str, targets: &mut [Target]) {
    for target in targets.iter_mut() {
        if target.keymap.is_some() && target.command_name.is_none() {
            target.command_name = Some(trigger_command_name(namespace, &target.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_for_bare_setting() {
        let raw = RawSetting {
            name: "x".to_string(),
            ..Default::default()
        };
        let target = normalize(Path::new("/p"), &raw);

        assert_eq!(target.name, "x");
        assert!(target.env.is_empty());
        assert!(target.args.is_empty());
        assert_eq!(target.cwd, PathBuf::from("/p"));
        assert!(target.sh);
        assert_eq!(target.error_match, "");
        assert!(target.command_name.is_none());
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let mut raw = RawSetting::new("build", "make")
            .with_args(["-j4"])
            .with_env("CC", "clang")
            .with_cwd("/elsewhere")
            .with_sh(false);
        raw.error_match = Some("(?<file>\\S+):(?<line>\\d+)".to_string());

        let target = normalize(Path::new("/p"), &raw);

        assert_eq!(target.args, vec!["-j4"]);
        assert_eq!(target.env.get("CC").map(String::as_str), Some("clang"));
        assert_eq!(target.cwd, PathBuf::from("/elsewhere"));
        assert!(!target.sh);
        assert_eq!(target.error_match, "(?<file>\\S+):(?<line>\\d+)");
    }

    #[test]
    fn test_empty_cwd_falls_back_to_project_path() {
        let mut raw = RawSetting::new("x", "make").with_cwd("");
        raw.error_match = Some(String::new());

        let target = normalize(Path::new("/p"), &raw);

        assert_eq!(target.cwd, PathBuf::from("/p"));
        assert_eq!(target.error_match, "");
    }

    #[test]
    fn test_input_not_mutated() {
        let raw = RawSetting::new("build", "make");
        let _ = normalize(Path::new("/p"), &raw);
        assert!(raw.args.is_none());
        assert!(raw.cwd.is_none());
        assert!(raw.sh.is_none());
    }

    #[test]
    fn test_synthesize_only_for_keymap_without_command() {
        let cwd = Path::new("/p");
        let mut targets = vec![
            normalize(cwd, &RawSetting::new("a", "make").with_keymap("ctrl-alt-a")),
            normalize(
                cwd,
                &RawSetting::new("b", "make")
                    .with_keymap("ctrl-alt-b")
                    .with_command_name("custom:b"),
            ),
            normalize(cwd, &RawSetting::new("c", "make")),
        ];

        synthesize_command_names("buildium", &mut targets);

        assert_eq!(
            targets[0].command_name.as_deref(),
            Some("buildium:trigger:a")
        );
        assert_eq!(targets[1].command_name.as_deref(), Some("custom:b"));
        assert!(targets[2].command_name.is_none());
    }
}
