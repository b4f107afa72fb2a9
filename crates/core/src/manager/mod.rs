//! Target manager
//!
//! Keeps one [`PathTargetStore`] per project path, refreshes them from the
//! registered tool providers and tracks the active target of each path.
//!
//! All state sits behind a single mutex that is never held across an await.
//! Every refresh of a path takes a new generation ticket from a manager-wide
//! counter; a refresh that finishes after a newer one started for the same
//! path, or after the path was removed, drops its results.

pub mod events;
pub mod store;

pub use events::{EVENT_CHANNEL_CAPACITY, ManagerEvent};
pub use store::PathTargetStore;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

use crate::{
    config::ManagerConfig,
    error::{Error, Result},
    interfaces::{
        CommandHandler, CompositeSubscription, HostContext, Notice, RefreshListener, ToolAdapter,
        ToolFactory, WORKSPACE_SCOPE,
    },
    targets::resolve_targets,
    types::{RawSetting, Target},
};

struct State {
    stores: BTreeMap<PathBuf, PathTargetStore>,
    tools: Vec<ToolFactory>,
}

struct Inner {
    host: HostContext,
    config: ManagerConfig,
    state: Mutex<State>,
    events: broadcast::Sender<ManagerEvent>,
    next_generation: AtomicU64,
}

/// Orchestrates target discovery and selection across project paths
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct TargetManager {
    inner: Arc<Inner>,
}

impl TargetManager {
    /// Create a manager with a store for every path the host currently reports
    pub fn new(host: HostContext, config: ManagerConfig) -> Self {
        let stores = host
            .project_paths
            .paths()
            .into_iter()
            .map(|path| (path.clone(), PathTargetStore::new(path)))
            .collect();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                host,
                config,
                state: Mutex::new(State {
                    stores,
                    tools: Vec::new(),
                }),
                events,
                next_generation: AtomicU64::new(0),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.inner.config
    }

    /// Receive every event emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ManagerEvent> {
        self.inner.events.subscribe()
    }

    fn emit(&self, event: ManagerEvent) {
        // No receivers is fine
        let _ = self.inner.events.send(event);
    }

    /// Replace the registered providers; takes effect on the next refresh
    pub fn set_tools(&self, tools: Vec<ToolFactory>) {
        debug!("Registered {} tool providers", tools.len());
        self.state().tools = tools;
    }

    /// Project paths with a store, in path order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.state().stores.keys().cloned().collect()
    }

    /// Re-query every provider for `paths`, or for all known paths
    ///
    /// Provider and refresh failures are reported through the host's
    /// notification sink; this never fails.
    pub async fn refresh_targets(&self, paths: Option<Vec<PathBuf>>) {
        let paths = paths.unwrap_or_else(|| self.paths());
        info!("Refreshing targets for {} path(s)", paths.len());

        let tickets: Vec<(PathBuf, u64)> = {
            let mut state = self.state();
            paths
                .iter()
                .filter_map(|path| {
                    let Some(store) = state.stores.get_mut(path) else {
                        debug!("Skipping refresh of unknown path {:?}", path);
                        return None;
                    };
                    let generation = self.inner.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
                    store.begin_refresh(generation);
                    Some((path.clone(), generation))
                })
                .collect()
        };

        let handles: Vec<_> = tickets
            .iter()
            .map(|(path, generation)| {
                let manager = self.clone();
                let path = path.clone();
                let generation = *generation;
                tokio::spawn(async move { manager.refresh_path(path, generation).await })
            })
            .collect();

        for ((path, generation), handle) in tickets.iter().zip(handles) {
            match handle.await {
                Ok(Some(count)) => debug!("Stored {} targets for {:?}", count, path),
                Ok(None) => {}
                Err(join_error) => self.report_refresh_failure(path, *generation, &join_error),
            }
        }

        self.emit(ManagerEvent::RefreshComplete);

        if paths.is_empty() || !self.inner.config.notification_on_refresh {
            return;
        }

        let rows: Vec<String> = {
            let state = self.state();
            paths
                .iter()
                .map(|path| match state.stores.get(path) {
                    Some(store) => {
                        format!("{} targets at: {}", store.targets().len(), path.display())
                    }
                    None => format!(
                        "Targets {} no longer exists. Is build deactivated?",
                        path.display()
                    ),
                })
                .collect()
        };
        self.inner
            .host
            .notifications
            .notify(Notice::info("Build targets parsed.", rows.join("\n")));
    }

    /// Leave `Loading` after the refresh task for `path` died
    fn report_refresh_failure(&self, path: &Path, generation: u64, join_error: &JoinError) {
        if let Some(store) = self.state().stores.get_mut(path) {
            if store.is_current(generation) {
                store.finish_refresh();
            }
        }

        let err = Error::Refresh(format!("refreshing {} failed: {join_error}", path.display()));
        error!("{}", err);
        self.inner
            .host
            .notifications
            .notify(Notice::error("Ooops. Something went wrong.", err.to_string()));
    }

    /// Refresh one path under ticket `generation`; `None` when superseded
    async fn refresh_path(&self, path: PathBuf, generation: u64) -> Option<usize> {
        let factories = self.state().tools.clone();

        let adapters: Vec<Arc<dyn ToolAdapter>> = factories
            .iter()
            .map(|factory| factory(&path))
            .filter(|adapter| adapter.is_eligible())
            .collect();
        debug!("{} eligible providers for {:?}", adapters.len(), path);

        {
            let mut state = self.state();
            let store = state.stores.get_mut(&path)?;
            if !store.is_current(generation) {
                return None;
            }
            for adapter in &adapters {
                if adapter.capabilities().change_notification {
                    if let Some(listener) = self.refresh_listener(&path) {
                        adapter.on_refresh(listener);
                    }
                }
                store.attach_tool(Arc::clone(adapter));
            }
        }

        let timeout = self.inner.config.adapter_timeout();
        let fetches: Vec<_> = adapters
            .into_iter()
            .map(|adapter| {
                let name = adapter.nice_name();
                (name, tokio::spawn(fetch_settings(adapter, timeout)))
            })
            .collect();

        let mut settings = Vec::new();
        for (name, handle) in fetches {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_error) => Err(Error::provider(&name, join_error.to_string())),
            };
            match result {
                Ok(mut provided) => {
                    debug!("{} provided {} settings for {:?}", name, provided.len(), path);
                    settings.append(&mut provided);
                }
                Err(err) => self.report_provider_error(&name, &err),
            }
        }

        let targets = resolve_targets(&path, &self.inner.config.command_namespace, &settings);

        let mut state = self.state();
        let Some(store) = state.stores.get_mut(&path) else {
            debug!("Path {:?} removed during refresh", path);
            return None;
        };
        if !store.is_current(generation) {
            debug!("Discarding superseded refresh of {:?}", path);
            return None;
        }

        store.replace_targets(targets);
        let subscriptions = self.register_subscriptions(store.targets());
        store.replace_subscriptions(subscriptions);
        store.finish_refresh();
        Some(store.targets().len())
    }

    /// Listener re-triggering a refresh of `path` when a provider reports changes
    fn refresh_listener(&self, path: &Path) -> Option<RefreshListener> {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                warn!("Change notifications unavailable outside a runtime: {}", err);
                return None;
            }
        };
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let path = path.to_path_buf();

        Some(Arc::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let manager = TargetManager { inner };
            let path = path.clone();
            debug!("Provider reported changes for {:?}", path);
            runtime.spawn(async move {
                manager.refresh_targets(Some(vec![path])).await;
            });
        }))
    }

    fn register_subscriptions(&self, targets: &[Target]) -> CompositeSubscription {
        let commands = &self.inner.host.commands;
        let mut subscriptions = CompositeSubscription::new();

        for target in targets {
            let Some(command_name) = target.command_name.as_deref() else {
                continue;
            };

            let events = self.inner.events.clone();
            let handler: CommandHandler = Arc::new(move |command_name: &str| {
                let _ = events.send(ManagerEvent::Trigger {
                    command_name: command_name.to_string(),
                });
            });
            subscriptions.add(commands.add_command(WORKSPACE_SCOPE, command_name, handler));

            if let Some(keymap) = target.keymap.as_deref() {
                subscriptions.add(commands.add_keybinding(&target.name, keymap, command_name));
            }
        }

        subscriptions
    }

    fn report_provider_error(&self, provider: &str, err: &Error) {
        let notice = match err {
            Error::ConfigSyntax { .. } => {
                warn!("Invalid build file reported by {}: {}", provider, err);
                Notice::error(
                    "Invalid build file.",
                    format!("You have a syntax error in your build file: {err}"),
                )
            }
            Error::Timeout { .. } => {
                warn!("{}", err);
                Notice::warning(
                    format!("The {provider} build provider timed out."),
                    err.to_string(),
                )
            }
            _ => {
                error!("{} build provider failed: {}", provider, err);
                let title = if provider.is_empty() {
                    "Ooops. Something went wrong.".to_string()
                } else {
                    format!("Ooops. Something went wrong in the {provider} build provider.")
                };
                Notice::error(title, err.to_string())
            }
        };
        self.inner.host.notifications.notify(notice);
    }

    /// Targets of `path`, refreshing first when none are stored yet
    ///
    /// Unknown paths yield an empty list.
    pub async fn get_targets(&self, path: &Path, refresh_if_empty: bool) -> Vec<Target> {
        let needs_refresh = {
            let state = self.state();
            match state.stores.get(path) {
                None => return Vec::new(),
                Some(store) => refresh_if_empty && store.targets().is_empty(),
            }
        };

        if needs_refresh {
            self.refresh_targets(Some(vec![path.to_path_buf()])).await;
        }

        self.state()
            .stores
            .get(path)
            .map(|store| store.targets().to_vec())
            .unwrap_or_default()
    }

    pub fn get_active_target(&self, path: &Path) -> Option<Target> {
        self.state()
            .stores
            .get(path)
            .and_then(|store| store.active_target().cloned())
    }

    /// Select the active target of `path` by name
    ///
    /// The name is not validated; pass one obtained from [`Self::get_targets`].
    pub fn set_active_target(&self, path: &Path, name: &str) {
        let target = {
            let mut state = self.state();
            let Some(store) = state.stores.get_mut(path) else {
                warn!("Cannot select {:?} for unknown path {:?}", name, path);
                return;
            };
            store.set_active_target_name(name);
            store.active_target().cloned()
        };

        info!("Active target for {:?} is now {:?}", path, name);
        self.emit(ManagerEvent::NewActiveTarget {
            path: path.to_path_buf(),
            target,
        });
    }

    pub fn is_loading(&self, path: &Path) -> bool {
        self.state()
            .stores
            .get(path)
            .is_some_and(PathTargetStore::is_loading)
    }

    /// React to the host's new full set of project paths
    ///
    /// New paths get a store and are refreshed; removed paths are disposed.
    /// Paths present before and after are left alone.
    pub async fn paths_changed(&self, new_paths: Vec<PathBuf>) {
        let added = {
            let mut state = self.state();

            let removed: Vec<PathBuf> = state
                .stores
                .keys()
                .filter(|path| !new_paths.contains(path))
                .cloned()
                .collect();
            for path in removed {
                if let Some(mut store) = state.stores.remove(&path) {
                    info!("Project path removed: {:?}", path);
                    store.dispose();
                }
            }

            let mut added = Vec::new();
            for path in new_paths {
                if !state.stores.contains_key(&path) {
                    info!("Project path added: {:?}", path);
                    state
                        .stores
                        .insert(path.clone(), PathTargetStore::new(path.clone()));
                    added.push(path);
                }
            }
            added
        };

        if !added.is_empty() {
            self.refresh_targets(Some(added)).await;
        }
    }

    /// Dispose every store
    pub fn destroy(&self) {
        let mut state = self.state();
        for (_, mut store) in std::mem::take(&mut state.stores) {
            store.dispose();
        }
        debug!("Target manager destroyed");
    }
}

async fn fetch_settings(
    adapter: Arc<dyn ToolAdapter>,
    timeout: Option<Duration>,
) -> Result<Vec<RawSetting>> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, adapter.settings())
            .await
            .map_err(|_| Error::Timeout {
                provider: adapter.nice_name(),
                secs: limit.as_secs(),
            })?,
        None => adapter.settings().await,
    }
}
