use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::event::{EventArgs, EventResult, ListenerCallback};
use crate::kernel::bootstrap::Kernel;
use crate::kernel::constants::LISTENER_KEY_SEPARATOR;
use crate::kernel::error::Result;

/// Compose the internal deduplication key for an `(event, listener)` pair.
fn listener_key(event: &str, listener: &str) -> String {
    format!("{event}{LISTENER_KEY_SEPARATOR}{listener}")
}

/// Event dispatcher for managing subscriptions and notifying listeners.
///
/// Keeps two disjoint maps: the per-event ordered sequence of listener keys
/// (insertion order is invocation order) and the key-to-callback map. Both
/// are interior-mutable so listeners can subscribe while a notification pass
/// is running; the pass iterates a snapshot of the sequence taken before the
/// first invocation, so such subscriptions only take effect on later passes.
#[derive(Default)]
pub struct EventDispatcher {
    // event name -> listener keys, in first-subscription order
    order: RefCell<HashMap<String, Vec<String>>>,
    // listener key -> callback
    subscriptions: RefCell<HashMap<String, ListenerCallback>>,
}

// Manual Debug implementation: callbacks are opaque closures
impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("events_count", &self.order.borrow().len())
            .field("subscriptions_count", &self.subscriptions.borrow().len())
            .finish()
    }
}

impl EventDispatcher {
    /// Create a new empty event dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `(event, listener)`.
    ///
    /// A new pair is appended to the event's invocation order; re-subscribing
    /// an existing pair overwrites the callback but keeps the position fixed
    /// by the first subscription.
    pub fn subscribe(&self, event: &str, listener: &str, callback: ListenerCallback) {
        let key = listener_key(event, listener);
        let mut subscriptions = self.subscriptions.borrow_mut();
        if !subscriptions.contains_key(&key) {
            self.order
                .borrow_mut()
                .entry(event.to_string())
                .or_default()
                .push(key.clone());
            log::debug!("Subscribed listener '{listener}' to event '{event}'");
        } else {
            log::debug!("Replaced callback of listener '{listener}' for event '{event}'");
        }
        subscriptions.insert(key, callback);
    }

    /// Notify every listener of `event` in registration order.
    ///
    /// Unknown events are a no-op, not an error. A listener returning
    /// [`EventResult::Stop`] terminates the pass; listeners after it are
    /// skipped for this call only. Listener errors propagate to the caller
    /// and also end the pass.
    pub fn notify(&self, event: &str, kernel: &Kernel, args: &EventArgs) -> Result<EventResult> {
        // Snapshot the key sequence so listeners may subscribe mid-pass
        // without invalidating the iteration.
        let keys: Vec<String> = match self.order.borrow().get(event) {
            Some(keys) => keys.clone(),
            None => {
                log::trace!("No listeners for event '{event}'");
                return Ok(EventResult::Continue);
            }
        };

        log::trace!("Notifying {} listener(s) of event '{event}'", keys.len());
        for key in keys {
            let callback = self.subscriptions.borrow().get(&key).map(Rc::clone);
            let Some(callback) = callback else { continue };
            if callback(kernel, args)? == EventResult::Stop {
                log::trace!("Listener '{key}' stopped propagation of event '{event}'");
                return Ok(EventResult::Stop);
            }
        }
        Ok(EventResult::Continue)
    }
}
