use anyhow::{Context, Result};
use buildium_core::{HostContext, ManagerConfig, MemoryHost, TargetManager, default_tools};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::display::ConsoleNotifier;

/// Load `config_file`, or the nearest config above the current directory
pub fn load_config(config_file: Option<&Path>) -> Result<ManagerConfig> {
    match config_file {
        Some(path) => ManagerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            ManagerConfig::load_from_path(&cwd).context("Failed to load config")
        }
    }
}

/// A target manager over fixed project paths with the built-in providers
pub struct Session {
    pub host: Arc<MemoryHost>,
    pub manager: TargetManager,
}

impl Session {
    pub fn start(paths: Vec<PathBuf>, config: ManagerConfig) -> Self {
        debug!("Starting session for {:?}", paths);
        let host = MemoryHost::new(paths);
        let context = HostContext::new(host.clone(), host.clone(), Arc::new(ConsoleNotifier));
        let manager = TargetManager::new(context, config);
        manager.set_tools(default_tools());
        Self { host, manager }
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.manager.paths()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.manager.destroy();
    }
}
