/// Kernel name
pub const KERNEL_NAME: &str = "pith";

/// Kernel version
pub const KERNEL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Separator joining an event name and a listener name into a listener key.
/// Internal deduplication detail, never part of the public surface.
pub(crate) const LISTENER_KEY_SEPARATOR: &str = " ";
