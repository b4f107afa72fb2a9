use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::expand::expand;
use crate::types::Target;

/// A target's command line with placeholders expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCommand {
    pub exec: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: BTreeMap<String, String>,
    pub sh: bool,
}

impl ResolvedCommand {
    pub fn to_shell_command(&self) -> String {
        let mut cmd = self.exec.clone();
        for arg in &self.args {
            cmd.push(' ');
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }
}

impl Target {
    /// Expand the target's command, arguments, cwd and env for `project_path`
    pub fn resolve(&self, project_path: &Path) -> ResolvedCommand {
        let env: BTreeMap<String, String> = self
            .env
            .iter()
            .map(|(key, value)| (key.clone(), expand(value, &self.env, project_path)))
            .collect();

        ResolvedCommand {
            exec: expand(&self.exec, &env, project_path),
            args: self
                .args
                .iter()
                .map(|arg| expand(arg, &env, project_path))
                .collect(),
            cwd: PathBuf::from(expand(&self.cwd.to_string_lossy(), &env, project_path)),
            env,
            sh: self.sh,
        }
    }
}
