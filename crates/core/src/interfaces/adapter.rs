//! Tool adapter interface
//!
//! Defines the trait build-tool providers implement and the factory type the
//! manager uses to instantiate them per project path.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::{error::Result, types::RawSetting};

/// Callback an adapter fires when its settings changed outside the manager
pub type RefreshListener = Arc<dyn Fn() + Send + Sync>;

/// Builds a fresh adapter instance for a project path
pub type ToolFactory = Arc<dyn Fn(&Path) -> Arc<dyn ToolAdapter> + Send + Sync>;

/// Optional capabilities an adapter declares
///
/// The manager only calls [`ToolAdapter::on_refresh`] and
/// [`ToolAdapter::remove_refresh_listeners`] on adapters declaring
/// `change_notification`, and only calls [`ToolAdapter::teardown`] on adapters
/// declaring `teardown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdapterCapabilities {
    pub change_notification: bool,
    pub teardown: bool,
}

impl AdapterCapabilities {
    pub const NONE: Self = Self {
        change_notification: false,
        teardown: false,
    };

    pub const ALL: Self = Self {
        change_notification: true,
        teardown: true,
    };
}

/// A build-tool provider bound to one project path
#[async_trait]
pub trait ToolAdapter: Send + Sync {
    /// Human readable provider name used in error notices
    fn nice_name(&self) -> String;

    fn capabilities(&self) -> AdapterCapabilities {
        AdapterCapabilities::NONE
    }

    /// Whether this provider applies to its project path
    fn is_eligible(&self) -> bool;

    /// Discover the settings this provider offers; may yield zero or many
    async fn settings(&self) -> Result<Vec<RawSetting>>;

    /// Register a listener fired when settings change externally
    fn on_refresh(&self, _listener: RefreshListener) {}

    /// Drop every listener registered with [`ToolAdapter::on_refresh`]
    fn remove_refresh_listeners(&self) {}

    /// Release resources held by the adapter
    fn teardown(&self) {}
}

/// Wrap an adapter constructor into a [`ToolFactory`]
pub fn tool_factory<A, F>(constructor: F) -> ToolFactory
where
    A: ToolAdapter + 'static,
    F: Fn(&Path) -> A + Send + Sync + 'static,
{
    Arc::new(move |path: &Path| Arc::new(constructor(path)) as Arc<dyn ToolAdapter>)
}
