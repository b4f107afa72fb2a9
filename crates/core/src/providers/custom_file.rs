//! Provider reading hand-written build files
//!
//! A build file is JSON (`.buildium.json`) or TOML (`.buildium.toml`) placed
//! in the project root or the user's home directory. Its top level describes
//! one build; an optional `targets` table adds named builds:
//!
//! ```toml
//! name = "all"
//! cmd = "make"
//! args = ["-j4"]
//!
//! [targets.clean]
//! cmd = "make"
//! args = ["clean"]
//! keymap = "ctrl-alt-c"
//! ```

use async_trait::async_trait;
use indexmap::IndexMap;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    interfaces::{AdapterCapabilities, RefreshListener, ToolAdapter},
    types::RawSetting,
};

/// Build file names, checked in this order in each directory
pub const BUILD_FILE_NAMES: [&str; 2] = [".buildium.json", ".buildium.toml"];

const DEFAULT_BUILD_NAME: &str = "default";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildEntry {
    cmd: Option<String>,
    args: Option<Vec<String>>,
    env: Option<BTreeMap<String, String>>,
    cwd: Option<PathBuf>,
    sh: Option<bool>,
    error_match: Option<String>,
    function_match: Option<String>,
    warning_match: Option<String>,
    #[serde(alias = "atomCommandName")]
    command_name: Option<String>,
    keymap: Option<String>,
    #[serde(default)]
    kill_signals: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BuildFile {
    name: Option<String>,
    #[serde(flatten)]
    build: BuildEntry,
    #[serde(default)]
    targets: IndexMap<String, BuildEntry>,
}

impl BuildEntry {
    fn into_setting(self, name: &str) -> RawSetting {
        RawSetting {
            name: format!("Custom: {name}"),
            exec: self.cmd.unwrap_or_default(),
            args: self.args,
            env: self.env,
            cwd: self.cwd,
            sh: self.sh,
            error_match: self.error_match,
            function_match: self.function_match,
            warning_match: self.warning_match,
            command_name: self.command_name,
            keymap: self.keymap,
            kill_signals: self.kill_signals,
            ..Default::default()
        }
    }
}

impl BuildFile {
    fn parse(path: &Path, contents: &str) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(contents).map_err(|e| Error::syntax(path, e.to_string())),
            _ => serde_json::from_str(contents).map_err(|e| Error::syntax(path, e.to_string())),
        }
    }

    fn into_settings(self) -> Vec<RawSetting> {
        let name = self.name.as_deref().unwrap_or(DEFAULT_BUILD_NAME).to_string();
        let mut settings = Vec::with_capacity(1 + self.targets.len());
        settings.push(self.build.into_setting(&name));
        settings.extend(
            self.targets
                .into_iter()
                .map(|(target_name, entry)| entry.into_setting(&target_name)),
        );
        settings
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn is_build_file_change(event: &Event) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event.paths.iter().any(|path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| BUILD_FILE_NAMES.contains(&name))
    })
}

/// Provider for `.buildium.json` / `.buildium.toml` build files
pub struct CustomFileProvider {
    cwd: PathBuf,
    home: Option<PathBuf>,
    files: Mutex<Vec<PathBuf>>,
    listeners: Arc<Mutex<Vec<RefreshListener>>>,
    watcher: Mutex<Option<RecommendedWatcher>>,
}

impl CustomFileProvider {
    pub fn new(cwd: &Path) -> Self {
        Self::with_home(cwd, dirs::home_dir())
    }

    /// Use `home` instead of the user's home directory as fallback location
    pub fn with_home(cwd: &Path, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            home,
            files: Mutex::new(Vec::new()),
            listeners: Arc::new(Mutex::new(Vec::new())),
            watcher: Mutex::new(None),
        }
    }

    /// Build files found by the last eligibility check
    pub fn files(&self) -> Vec<PathBuf> {
        lock(&self.files).clone()
    }

    fn find_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let search_dirs = std::iter::once(self.cwd.as_path()).chain(self.home.as_deref());
        for dir in search_dirs {
            for name in BUILD_FILE_NAMES {
                let file = dir.join(name);
                if file.is_file() && !files.contains(&file) {
                    files.push(file);
                }
            }
        }
        files
    }

    /// Replace the file watcher with one covering `files`
    fn watch(&self, files: &[PathBuf]) {
        let listeners = Arc::clone(&self.listeners);
        let handler = move |res: notify::Result<Event>| match res {
            Ok(event) if is_build_file_change(&event) => {
                debug!("Build file changed: {:?}", event.paths);
                let current: Vec<RefreshListener> = lock(&listeners).clone();
                for listener in current {
                    listener();
                }
            }
            Ok(_) => {}
            Err(err) => warn!("Build file watcher error: {}", err),
        };

        let mut watcher = match notify::recommended_watcher(handler) {
            Ok(watcher) => watcher,
            Err(err) => {
                warn!("Cannot watch build files: {}", err);
                return;
            }
        };

        let mut watched_dirs: Vec<&Path> = files.iter().filter_map(|file| file.parent()).collect();
        watched_dirs.sort();
        watched_dirs.dedup();
        for dir in watched_dirs {
            if let Err(err) = watcher.watch(dir, RecursiveMode::NonRecursive) {
                warn!("Cannot watch {:?}: {}", dir, err);
            }
        }

        *lock(&self.watcher) = Some(watcher);
    }
}

#[async_trait]
impl ToolAdapter for CustomFileProvider {
    fn nice_name(&self) -> String {
        "Custom file".to_string()
    }

    fn capabilities(&self) -> AdapterCapabilities {
        AdapterCapabilities::ALL
    }

    fn is_eligible(&self) -> bool {
        let files = self.find_files();
        let eligible = !files.is_empty();
        *lock(&self.files) = files;
        eligible
    }

    async fn settings(&self) -> Result<Vec<RawSetting>> {
        let files = self.files();
        self.watch(&files);

        let mut settings = Vec::new();
        for file in &files {
            let contents = tokio::fs::read_to_string(file).await?;
            let build = BuildFile::parse(file, &contents)?;
            settings.extend(build.into_settings());
        }
        Ok(settings)
    }

    fn on_refresh(&self, listener: RefreshListener) {
        lock(&self.listeners).push(listener);
    }

    fn remove_refresh_listeners(&self) {
        lock(&self.listeners).clear();
    }

    fn teardown(&self) {
        lock(&self.watcher).take();
        lock(&self.listeners).clear();
    }
}
