//! Interfaces at the seams of the manager
//!
//! Tool providers plug in through [`ToolAdapter`]; the embedding application
//! plugs in through [`HostContext`].

pub mod adapter;
pub mod host;
pub mod memory_host;

pub use adapter::{AdapterCapabilities, RefreshListener, ToolAdapter, ToolFactory, tool_factory};
pub use host::{
    CommandHandler, CommandRegistry, CompositeSubscription, HostContext, Notice, NoticeLevel,
    NotificationSink, ProjectPaths, Subscription, WORKSPACE_SCOPE,
};
pub use memory_host::{Keybinding, MemoryHost};
