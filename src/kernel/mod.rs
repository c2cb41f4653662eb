//! # Pith Kernel
//!
//! The `kernel` module forms the heart of the `pith` application framework.
//! It combines a lazy service container and an eager parameter store behind a
//! single [`Kernel`] facade, and wires that facade to the event dispatcher in
//! the [`event`](crate::event) module.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Kernel Facade**: The [`Kernel`](bootstrap::Kernel) struct in the
//!   `bootstrap` submodule exposes the whole public surface (service,
//!   parameter, and event operations) and owns the per-instance state.
//! - **Service Registry**: Lazy, tagged service definitions and the resolved
//!   singleton cache live in [`ServiceRegistry`](registry::ServiceRegistry)
//!   in the `registry` submodule.
//! - **Parameter Store**: Eagerly stored configuration values, managed by
//!   [`ParameterStore`](parameters::ParameterStore) in the `parameters`
//!   submodule.
//! - **Core Constants**: System-wide constants via the `constants` submodule.
//! - **Error Handling**: Kernel-specific error types ([`Error`](error::Error))
//!   and a `Result` alias in the `error` submodule.
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod parameters;
pub mod registry;

pub use bootstrap::Kernel;
pub use error::{Error, Result};
pub use parameters::ParameterStore;
pub use registry::{ServiceFactory, ServiceInstance, ServiceKind, ServiceRegistry};
// Test module declaration
#[cfg(test)]
mod tests;
