//! Per-project-path target bookkeeping

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::interfaces::{CompositeSubscription, ToolAdapter};
use crate::types::Target;

/// Targets, active selection and live providers of one project path
///
/// Lifecycle: `Idle(no targets) -> Loading -> Idle(with targets)`, re-entered
/// on every refresh, until [`PathTargetStore::dispose`] when the path leaves
/// the workspace.
pub struct PathTargetStore {
    path: PathBuf,
    loading: bool,
    targets: Vec<Target>,
    active_target_name: Option<String>,
    instanced_tools: Vec<Arc<dyn ToolAdapter>>,
    subscriptions: CompositeSubscription,
    generation: u64,
    disposed: bool,
}

impl PathTargetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loading: false,
            targets: Vec::new(),
            active_target_name: None,
            instanced_tools: Vec::new(),
            subscriptions: CompositeSubscription::new(),
            generation: 0,
            disposed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Targets in priority order, highest first
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn active_target_name(&self) -> Option<&str> {
        self.active_target_name.as_deref()
    }

    /// The active target, if its name still resolves
    pub fn active_target(&self) -> Option<&Target> {
        let name = self.active_target_name.as_deref()?;
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn set_active_target_name(&mut self, name: impl Into<String>) {
        self.active_target_name = Some(name.into());
    }

    pub fn instanced_tools(&self) -> &[Arc<dyn ToolAdapter>] {
        &self.instanced_tools
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Enter `Loading` under the ticket `generation`
    ///
    /// Tickets come from a manager-wide counter, so a store created for a
    /// re-added path never matches a ticket handed to its predecessor.
    /// Listeners of the previous provider instances are detached; a refresh
    /// that started earlier loses its ticket and its results get discarded.
    pub(crate) fn begin_refresh(&mut self, generation: u64) {
        self.detach_tools();
        self.generation = generation;
        self.loading = true;
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        !self.disposed && self.generation == generation
    }

    pub(crate) fn attach_tool(&mut self, tool: Arc<dyn ToolAdapter>) {
        self.instanced_tools.push(tool);
    }

    /// Store freshly resolved targets and re-validate the active selection
    ///
    /// When the active name no longer names a target, the highest-priority
    /// target becomes active, or nothing when the list is empty.
    pub(crate) fn replace_targets(&mut self, targets: Vec<Target>) {
        let still_present = self
            .active_target_name
            .as_deref()
            .is_some_and(|name| targets.iter().any(|t| t.name == name));

        if !still_present {
            let fallback = targets.first().map(|t| t.name.clone());
            tracing::debug!(
                "Active target for {:?} reset from {:?} to {:?}",
                self.path,
                self.active_target_name,
                fallback
            );
            self.active_target_name = fallback;
        }

        self.targets = targets;
    }

    /// Revoke the previous registrations and keep `subscriptions` instead
    pub(crate) fn replace_subscriptions(&mut self, subscriptions: CompositeSubscription) {
        self.subscriptions.dispose();
        self.subscriptions = subscriptions;
    }

    pub(crate) fn finish_refresh(&mut self) {
        self.loading = false;
    }

    fn detach_tools(&mut self) {
        for tool in self.instanced_tools.drain(..) {
            if tool.capabilities().change_notification {
                tool.remove_refresh_listeners();
            }
        }
    }

    /// Detach listeners, tear providers down and revoke registrations
    ///
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.loading = false;

        for tool in self.instanced_tools.drain(..) {
            let capabilities = tool.capabilities();
            if capabilities.change_notification {
                tool.remove_refresh_listeners();
            }
            if capabilities.teardown {
                tool.teardown();
            }
        }
        self.subscriptions.dispose();
    }
}

impl std::fmt::Debug for PathTargetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathTargetStore")
            .field("path", &self.path)
            .field("loading", &self.loading)
            .field(
                "targets",
                &self.targets.iter().map(|t| &t.name).collect::<Vec<_>>(),
            )
            .field("active_target_name", &self.active_target_name)
            .field("instanced_tools", &self.instanced_tools.len())
            .field("subscriptions", &self.subscriptions.len())
            .field("generation", &self.generation)
            .finish()
    }
}
