use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::event::dispatcher::EventDispatcher;
use crate::event::{EventArgs, EventResult};
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::kernel::parameters::ParameterStore;
use crate::kernel::registry::{ServiceInstance, ServiceKind, ServiceRegistry};

/// The application kernel: a lazy service container, an eager parameter
/// store, and a synchronous event dispatcher behind one facade.
///
/// A kernel is constructed empty; the host populates it imperatively with
/// service definitions, parameters, and subscriptions, then hands `&Kernel`
/// to every factory and listener. All operations take `&self` (the four
/// namespaces are interior-mutable), and the kernel is deliberately not
/// `Sync`: one instance serves one logical thread of control.
pub struct Kernel {
    services: ServiceRegistry,
    parameters: ParameterStore,
    events: EventDispatcher,
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("services", &self.services)
            .field("parameters", &self.parameters)
            .field("events", &self.events)
            .finish()
    }
}

impl Kernel {
    /// Create a new empty kernel.
    pub fn new() -> Self {
        log::info!(
            "Initializing {} v{}",
            constants::KERNEL_NAME,
            constants::KERNEL_VERSION
        );
        Kernel {
            services: ServiceRegistry::new(),
            parameters: ParameterStore::new(),
            events: EventDispatcher::new(),
        }
    }

    // --- Service container ---

    /// Define service `id` with an explicit lifetime tag.
    ///
    /// Redefining an existing `id` replaces the definition and discards any
    /// cached singleton instance, so the next access invokes the new factory.
    pub fn define_service<F>(&self, id: &str, kind: ServiceKind, factory: F)
    where
        F: Fn(&Kernel) -> Result<ServiceInstance> + 'static,
    {
        self.services.define(id, kind, Rc::new(factory));
    }

    /// Define a singleton service: the factory runs at most once per kernel.
    pub fn define_singleton<F>(&self, id: &str, factory: F)
    where
        F: Fn(&Kernel) -> Result<ServiceInstance> + 'static,
    {
        self.define_service(id, ServiceKind::Singleton, factory);
    }

    /// Define a transient service: the factory runs on every access.
    pub fn define_transient<F>(&self, id: &str, factory: F)
    where
        F: Fn(&Kernel) -> Result<ServiceInstance> + 'static,
    {
        self.define_service(id, ServiceKind::Transient, factory);
    }

    /// Resolve service `id`.
    ///
    /// Fails with [`Error::UndefinedService`] when `id` has no definition;
    /// factory errors propagate unmodified.
    pub fn get_service(&self, id: &str) -> Result<ServiceInstance> {
        self.services.resolve(id, self)
    }

    /// Resolve service `id` and downcast it to `T`.
    ///
    /// Fails with [`Error::ServiceType`] when the resolved instance is not
    /// a `T`.
    pub fn get_service_as<T: 'static>(&self, id: &str) -> Result<Rc<T>> {
        self.get_service(id)?
            .downcast::<T>()
            .map_err(|_| Error::ServiceType {
                id: id.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Check whether `id` is defined, without resolving it.
    pub fn has_service(&self, id: &str) -> bool {
        self.services.contains(id)
    }

    /// Resolve `id` as the application entry point.
    ///
    /// Equivalent to [`get_service`](Kernel::get_service); exists to mark
    /// the call site that starts the application.
    pub fn run(&self, id: &str) -> Result<ServiceInstance> {
        log::info!("Running entry point service '{id}'");
        self.get_service(id)
    }

    // --- Parameter store ---

    /// Return the value stored under `key`.
    ///
    /// Fails with [`Error::UndefinedParameter`] when absent.
    pub fn get_parameter(&self, key: &str) -> Result<Value> {
        self.parameters.get(key)
    }

    /// Return the value stored under `key`, deserialized as `T`.
    pub fn parameter_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.parameters.get_as(key)
    }

    /// Store `value` under `key`, overwriting any previous value.
    pub fn set_parameter(&self, key: &str, value: Value) {
        self.parameters.set(key, value);
    }

    /// Check whether `key` exists; `true` even for stored `null` or falsy
    /// values.
    pub fn has_parameter(&self, key: &str) -> bool {
        self.parameters.contains(key)
    }

    /// Delete `key`; a no-op when absent.
    pub fn delete_parameter(&self, key: &str) {
        self.parameters.remove(key);
    }

    // --- Event dispatcher ---

    /// Subscribe `callback` under the `(event, listener)` pair.
    ///
    /// The first subscription of a pair fixes its position in the event's
    /// invocation order; later subscriptions of the same pair replace the
    /// callback in place.
    pub fn subscribe<F>(&self, event: &str, listener: &str, callback: F)
    where
        F: Fn(&Kernel, &EventArgs) -> Result<EventResult> + 'static,
    {
        self.events.subscribe(event, listener, Rc::new(callback));
    }

    /// Notify the listeners of `event` with empty arguments.
    pub fn notify(&self, event: &str) -> Result<EventResult> {
        self.events.notify(event, self, &EventArgs::new())
    }

    /// Notify the listeners of `event`, passing `args` to each in turn.
    ///
    /// Returns [`EventResult::Stop`] when a listener short-circuited the
    /// pass, [`EventResult::Continue`] otherwise (including for events with
    /// no listeners).
    pub fn notify_with(&self, event: &str, args: &EventArgs) -> Result<EventResult> {
        self.events.notify(event, self, args)
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}
