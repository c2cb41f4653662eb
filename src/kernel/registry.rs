use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::kernel::bootstrap::Kernel;
use crate::kernel::error::{Error, Result};

/// A resolved, type-erased service instance.
///
/// Factories return their constructed object behind `Rc<dyn Any>` so that
/// singleton instances can be shared between the cache and every caller.
/// Use [`Kernel::get_service_as`](crate::kernel::Kernel::get_service_as) to
/// recover the concrete type.
pub type ServiceInstance = Rc<dyn Any>;

/// A service factory: builds an instance, with the kernel available for
/// resolving other services and parameters.
pub type ServiceFactory = Rc<dyn Fn(&Kernel) -> Result<ServiceInstance>>;

/// Wrap a concrete value as a [`ServiceInstance`].
pub fn instance<T: 'static>(value: T) -> ServiceInstance {
    Rc::new(value)
}

/// Lifetime of a registered service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Resolved at most once per kernel instance; the result is cached and
    /// returned on every later access
    Singleton,
    /// Resolved anew on every access
    Transient,
}

/// A stored definition: the lifetime tag plus the factory.
struct ServiceDefinition {
    kind: ServiceKind,
    factory: ServiceFactory,
}

/// Registry of lazy service definitions and the resolved singleton cache.
///
/// Both maps are interior-mutable so factories can be invoked with the kernel
/// borrowed immutably, letting a factory define or resolve further services
/// while its own resolution is in flight.
#[derive(Default)]
pub struct ServiceRegistry {
    definitions: RefCell<HashMap<String, ServiceDefinition>>,
    // Singleton cache, keyed by service id. A redefinition discards the cell.
    resolved: RefCell<HashMap<String, ServiceInstance>>,
}

// Manual Debug implementation: definitions hold opaque factory closures
impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("definitions_count", &self.definitions.borrow().len())
            .field("resolved_count", &self.resolved.borrow().len())
            .finish()
    }
}

impl ServiceRegistry {
    /// Create a new empty service registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a definition under `id`, replacing any previous definition and
    /// discarding any cached singleton instance for it.
    pub fn define(&self, id: &str, kind: ServiceKind, factory: ServiceFactory) {
        log::debug!("Defining {kind:?} service '{id}'");
        self.definitions
            .borrow_mut()
            .insert(id.to_string(), ServiceDefinition { kind, factory });
        self.resolved.borrow_mut().remove(id);
    }

    /// Presence check against the definition map only; never resolves.
    pub fn contains(&self, id: &str) -> bool {
        self.definitions.borrow().contains_key(id)
    }

    /// Resolve `id`, invoking the factory or returning the cached singleton.
    pub fn resolve(&self, id: &str, kernel: &Kernel) -> Result<ServiceInstance> {
        // Clone the factory handle out of the borrow before invoking it, so
        // the factory itself may define or resolve services on this registry.
        let (kind, factory) = {
            let definitions = self.definitions.borrow();
            let definition = definitions
                .get(id)
                .ok_or_else(|| Error::UndefinedService { id: id.to_string() })?;
            (definition.kind, Rc::clone(&definition.factory))
        };

        match kind {
            ServiceKind::Transient => {
                log::trace!("Resolving transient service '{id}'");
                factory(kernel)
            }
            ServiceKind::Singleton => {
                if let Some(cached) = self.resolved.borrow().get(id) {
                    log::trace!("Returning cached singleton service '{id}'");
                    return Ok(Rc::clone(cached));
                }
                log::trace!("Resolving singleton service '{id}'");
                let resolved = factory(kernel)?;
                self.resolved
                    .borrow_mut()
                    .insert(id.to_string(), Rc::clone(&resolved));
                Ok(resolved)
            }
        }
    }
}
