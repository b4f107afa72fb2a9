use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::setting::BuildHooks;

/// Signals sent, in order, when a running build is stopped
pub const DEFAULT_KILL_SIGNALS: [&str; 3] = ["SIGINT", "SIGTERM", "SIGKILL"];

/// A fully resolved, uniquely named build configuration
///
/// Produced from a [`RawSetting`](super::RawSetting) by normalization and name
/// deduplication. Every field that has a default is populated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub name: String,
    pub exec: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: PathBuf,
    pub sh: bool,
    pub error_match: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keymap: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub kill_signals: Vec<String>,
    #[serde(skip)]
    pub hooks: BuildHooks,
}

impl Target {
    /// Kill signals to use when stopping this target's build
    pub fn effective_kill_signals(&self) -> Vec<&str> {
        if self.kill_signals.is_empty() {
            DEFAULT_KILL_SIGNALS.to_vec()
        } else {
            self.kill_signals.iter().map(String::as_str).collect()
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
