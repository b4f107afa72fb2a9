//! In-memory host
//!
//! A [`HostContext`] implementation that keeps registrations and notices in
//! memory. Used by the command-line front end and by tests.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::host::{
    CommandHandler, CommandRegistry, HostContext, Notice, NotificationSink, ProjectPaths,
    Subscription,
};

#[derive(Default)]
struct Registry {
    next_id: u64,
    commands: BTreeMap<u64, (String, CommandHandler)>,
    keybindings: BTreeMap<u64, Keybinding>,
}

/// A keybinding registered through [`CommandRegistry::add_keybinding`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub source: String,
    pub keystroke: String,
    pub command_name: String,
}

#[derive(Default)]
pub struct MemoryHost {
    paths: Mutex<Vec<PathBuf>>,
    registry: Arc<Mutex<Registry>>,
    notices: Mutex<Vec<Notice>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryHost {
    pub fn new(paths: Vec<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            paths: Mutex::new(paths),
            ..Default::default()
        })
    }

    /// Capability bundle backed by this host
    pub fn context(self: &Arc<Self>) -> HostContext {
        HostContext::new(self.clone(), self.clone(), self.clone())
    }

    pub fn set_paths(&self, paths: Vec<PathBuf>) {
        *lock(&self.paths) = paths;
    }

    /// Names of the currently registered commands, in registration order
    pub fn command_names(&self) -> Vec<String> {
        lock(&self.registry)
            .commands
            .values()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn keybindings(&self) -> Vec<Keybinding> {
        lock(&self.registry).keybindings.values().cloned().collect()
    }

    /// Invoke every handler registered under `command_name`
    ///
    /// Returns `false` when no such command is registered.
    pub fn dispatch(&self, command_name: &str) -> bool {
        let handlers: Vec<CommandHandler> = lock(&self.registry)
            .commands
            .values()
            .filter(|(name, _)| name == command_name)
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in &handlers {
            handler(command_name);
        }
        !handlers.is_empty()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *lock(&self.notices))
    }
}

impl ProjectPaths for MemoryHost {
    fn paths(&self) -> Vec<PathBuf> {
        lock(&self.paths).clone()
    }
}

impl CommandRegistry for MemoryHost {
    fn add_command(
        &self,
        _scope: &str,
        command_name: &str,
        handler: CommandHandler,
    ) -> Subscription {
        let id = {
            let mut registry = lock(&self.registry);
            registry.next_id += 1;
            let id = registry.next_id;
            registry
                .commands
                .insert(id, (command_name.to_string(), handler));
            id
        };

        let registry = Arc::clone(&self.registry);
        Subscription::new(move || {
            lock(&registry).commands.remove(&id);
        })
    }

    fn add_keybinding(&self, source: &str, keystroke: &str, command_name: &str) -> Subscription {
        let id = {
            let mut registry = lock(&self.registry);
            registry.next_id += 1;
            let id = registry.next_id;
            registry.keybindings.insert(
                id,
                Keybinding {
                    source: source.to_string(),
                    keystroke: keystroke.to_string(),
                    command_name: command_name.to_string(),
                },
            );
            id
        };

        let registry = Arc::clone(&self.registry);
        Subscription::new(move || {
            lock(&registry).keybindings.remove(&id);
        })
    }
}

impl NotificationSink for MemoryHost {
    fn notify(&self, notice: Notice) {
        tracing::debug!("Notice: {} ({})", notice.title, notice.detail);
        lock(&self.notices).push(notice);
    }
}
