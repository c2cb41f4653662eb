// Declare the kernel and event modules
pub mod event;
pub mod kernel;

// Re-export key public types for easier use by hosts and service code
pub use event::{EventArgs, EventDispatcher, EventResult};
pub use kernel::error::{Error, Result};
pub use kernel::registry::instance;
pub use kernel::{Kernel, ParameterStore, ServiceInstance, ServiceKind, ServiceRegistry};
