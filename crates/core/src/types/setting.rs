use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Callable run before a build starts
pub type PreBuildHook = Arc<dyn Fn() + Send + Sync>;

/// Callable run after a build finishes with `(success, stdout, stderr)`
pub type PostBuildHook = Arc<dyn Fn(bool, &str, &str) + Send + Sync>;

/// Pre/post build hooks carried through target bookkeeping untouched
#[derive(Clone, Default)]
pub struct BuildHooks {
    pub pre_build: Option<PreBuildHook>,
    pub post_build: Option<PostBuildHook>,
}

impl fmt::Debug for BuildHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildHooks")
            .field("pre_build", &self.pre_build.is_some())
            .field("post_build", &self.post_build.is_some())
            .finish()
    }
}

/// A build setting as reported by a tool provider, before defaults are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSetting {
    /// Display name, not yet unique
    pub name: String,

    /// Command to execute
    #[serde(default)]
    pub exec: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Run through a shell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sh: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_match: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_match: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_match: Option<String>,

    /// Identifier of the trigger command for this setting
    #[serde(
        default,
        alias = "atomCommandName",
        skip_serializing_if = "Option::is_none"
    )]
    pub command_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keymap: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kill_signals: Vec<String>,

    #[serde(skip)]
    pub hooks: BuildHooks,
}

impl RawSetting {
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec: exec.into(),
            ..Default::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_sh(mut self, sh: bool) -> Self {
        self.sh = Some(sh);
        self
    }

    pub fn with_command_name(mut self, command_name: impl Into<String>) -> Self {
        self.command_name = Some(command_name.into());
        self
    }

    pub fn with_keymap(mut self, keymap: impl Into<String>) -> Self {
        self.keymap = Some(keymap.into());
        self
    }
}
