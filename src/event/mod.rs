//! # Pith Event System
//!
//! Synchronous event dispatch with ordered, short-circuitable listener
//! chains. Listeners are registered under an `(event, listener)` pair;
//! the first registration of a pair fixes its position in the event's
//! invocation order, and every [`notify`](crate::kernel::Kernel::notify)
//! call walks that order on the caller's thread until a listener signals
//! [`EventResult::Stop`].
pub mod dispatcher;

use std::rc::Rc;

use crate::kernel::bootstrap::Kernel;
use crate::kernel::error::Result;

/// Result of listener processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was processed and propagation should continue
    Continue,
    /// Event was processed and propagation should stop
    Stop,
}

/// Arguments passed to every listener of a `notify` call.
pub type EventArgs = serde_json::Map<String, serde_json::Value>;

/// A listener callback: receives the kernel and the notification arguments,
/// and decides whether propagation continues.
pub type ListenerCallback = Rc<dyn Fn(&Kernel, &EventArgs) -> Result<EventResult>>;

/// Re-export important types
pub use dispatcher::EventDispatcher;
