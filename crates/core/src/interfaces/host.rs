//! Host capabilities
//!
//! Everything the manager needs from the embedding application is passed in
//! through [`HostContext`]: the set of project paths, a registry for trigger
//! commands and keybindings, and a sink for user-visible notices.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Handler invoked with the command name when a registered command fires
pub type CommandHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Scope trigger commands are registered in
pub const WORKSPACE_SCOPE: &str = "workspace";

/// A revocable registration handle
pub struct Subscription {
    revoke: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new<F>(revoke: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            revoke: Some(Box::new(revoke)),
        }
    }

    /// Revoke the registration; later calls do nothing
    pub fn dispose(&mut self) {
        if let Some(revoke) = self.revoke.take() {
            revoke();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.revoke.is_none()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// A set of subscriptions revoked together
///
/// Once disposed the set stays disposed: anything added afterwards is revoked
/// immediately.
#[derive(Debug, Default)]
pub struct CompositeSubscription {
    items: Vec<Subscription>,
    disposed: bool,
}

impl CompositeSubscription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mut subscription: Subscription) {
        if self.disposed {
            subscription.dispose();
        } else {
            self.items.push(subscription);
        }
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        for mut item in self.items.drain(..) {
            item.dispose();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Source of the workspace's project paths
pub trait ProjectPaths: Send + Sync {
    fn paths(&self) -> Vec<PathBuf>;
}

/// Registry for trigger commands and their keybindings
pub trait CommandRegistry: Send + Sync {
    fn add_command(&self, scope: &str, command_name: &str, handler: CommandHandler)
    -> Subscription;

    /// Bind `keystroke` to `command_name`; `source` names the owning target
    fn add_keybinding(&self, source: &str, keystroke: &str, command_name: &str) -> Subscription;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-visible report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub detail: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Capability bundle injected into the target manager
#[derive(Clone)]
pub struct HostContext {
    pub project_paths: Arc<dyn ProjectPaths>,
    pub commands: Arc<dyn CommandRegistry>,
    pub notifications: Arc<dyn NotificationSink>,
}

impl HostContext {
    pub fn new(
        project_paths: Arc<dyn ProjectPaths>,
        commands: Arc<dyn CommandRegistry>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            project_paths,
            commands,
            notifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>) -> Subscription {
        let counter = Arc::clone(counter);
        Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_subscription_revokes_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut sub = counting(&counter);

        sub.dispose();
        sub.dispose();

        assert!(sub.is_disposed());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_composite_dispose_is_idempotent() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut composite = CompositeSubscription::new();
        composite.add(counting(&counter));
        composite.add(counting(&counter));
        assert_eq!(composite.len(), 2);

        composite.dispose();
        composite.dispose();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(composite.is_empty());
    }

    #[test]
    fn test_add_after_dispose_revokes_immediately() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut composite = CompositeSubscription::new();
        composite.dispose();

        composite.add(counting(&counter));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(composite.is_empty());
    }
}
