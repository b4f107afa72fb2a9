use buildium_core::{ResolvedCommand, Target};
use std::fmt::Write;

/// Describe what running `target` would do
pub fn format_command_breakdown(target: &Target, command: &ResolvedCommand) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🎯 Target: {}", target.name);
    let _ = writeln!(out, "   $ {}", command.to_shell_command());
    let _ = writeln!(out, "   • cwd: {}", command.cwd.display());
    let _ = writeln!(out, "   • shell: {}", command.sh);

    if !command.env.is_empty() {
        let _ = writeln!(out, "   • env:");
        for (key, value) in &command.env {
            let _ = writeln!(out, "       {}={}", key, value);
        }
    }

    if let Some(command_name) = &target.command_name {
        let _ = write!(out, "   • command: {}", command_name);
        if let Some(keymap) = &target.keymap {
            let _ = write!(out, " ({})", keymap);
        }
        out.push('\n');
    }

    if !target.error_match.is_empty() {
        let _ = writeln!(out, "   • errorMatch: {}", target.error_match);
    }

    let _ = writeln!(out, "   • killSignals: {}", target.effective_kill_signals().join(", "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildium_core::{RawSetting, targets::resolve_targets};
    use std::path::Path;

    #[test]
    fn test_breakdown_lists_expanded_command() {
        let path = Path::new("/p");
        let raw = RawSetting::new("docs", "cargo")
            .with_args(["doc", "--target-dir", "{PROJECT_PATH}/out dir"])
            .with_env("MODE", "fast")
            .with_keymap("ctrl-d");
        let target = resolve_targets(path, "buildium", &[raw]).remove(0);
        let command = target.resolve(path);

        let out = format_command_breakdown(&target, &command);

        assert_eq!(
            out,
            "🎯 Target: docs\n   $ cargo doc --target-dir '/p/out dir'\n   • cwd: /p\n   • shell: true\n   • env:\n       MODE=fast\n   • command: buildium:trigger:docs (ctrl-d)\n   • killSignals: SIGINT, SIGTERM, SIGKILL\n"
        );
    }
}
