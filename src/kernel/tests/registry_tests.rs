use std::cell::Cell;
use std::rc::Rc;

use crate::kernel::bootstrap::Kernel;
use crate::kernel::error::Error;
use crate::kernel::registry::{ServiceKind, instance};

#[derive(Debug)]
struct Clock {
    timestamp: u64,
}

#[test]
fn test_singleton_resolved_at_most_once() {
    let kernel = Kernel::new();
    let invocations = Rc::new(Cell::new(0u32));

    let counter = Rc::clone(&invocations);
    kernel.define_singleton("clock", move |_kernel| {
        counter.set(counter.get() + 1);
        Ok(instance(Clock { timestamp: 42 }))
    });

    let first = kernel.get_service("clock").expect("first resolution failed");
    let second = kernel.get_service("clock").expect("second resolution failed");

    assert!(
        Rc::ptr_eq(&first, &second),
        "Singleton accesses should return the identical instance"
    );
    assert_eq!(invocations.get(), 1, "Factory should run exactly once");
}

#[test]
fn test_transient_resolved_per_access() {
    let kernel = Kernel::new();
    let invocations = Rc::new(Cell::new(0u32));

    let counter = Rc::clone(&invocations);
    kernel.define_transient("clock", move |_kernel| {
        counter.set(counter.get() + 1);
        Ok(instance(Clock { timestamp: 42 }))
    });

    let first = kernel.get_service("clock").expect("first resolution failed");
    let second = kernel.get_service("clock").expect("second resolution failed");

    assert!(
        !Rc::ptr_eq(&first, &second),
        "Transient accesses should construct fresh instances"
    );
    assert_eq!(invocations.get(), 2, "Factory should run once per access");
}

#[test]
fn test_redefinition_discards_cached_instance() {
    let kernel = Kernel::new();
    kernel.define_singleton("greeting", |_kernel| Ok(instance(String::from("hello"))));

    // Resolve once so the singleton cache is populated
    let cached: Rc<String> = kernel.get_service_as("greeting").unwrap();
    assert_eq!(*cached, "hello");

    kernel.define_singleton("greeting", |_kernel| Ok(instance(String::from("goodbye"))));
    let replaced: Rc<String> = kernel.get_service_as("greeting").unwrap();
    assert_eq!(
        *replaced, "goodbye",
        "Redefinition should invalidate the old cached value"
    );
}

#[test]
fn test_undefined_service_is_an_error() {
    let kernel = Kernel::new();

    assert!(!kernel.has_service("missing"));
    let err = kernel.get_service("missing").unwrap_err();
    assert!(matches!(err, Error::UndefinedService { id } if id == "missing"));
}

#[test]
fn test_has_service_does_not_resolve() {
    let kernel = Kernel::new();
    let resolved = Rc::new(Cell::new(false));

    let flag = Rc::clone(&resolved);
    kernel.define_singleton("lazy", move |_kernel| {
        flag.set(true);
        Ok(instance(()))
    });

    assert!(kernel.has_service("lazy"));
    assert!(!resolved.get(), "Presence check must not invoke the factory");
}

#[test]
fn test_typed_accessor_rejects_wrong_type() {
    let kernel = Kernel::new();
    kernel.define_singleton("clock", |_kernel| Ok(instance(Clock { timestamp: 7 })));

    let clock: Rc<Clock> = kernel.get_service_as("clock").unwrap();
    assert_eq!(clock.timestamp, 7);

    let err = kernel.get_service_as::<String>("clock").unwrap_err();
    assert!(matches!(err, Error::ServiceType { id, .. } if id == "clock"));
}

#[test]
fn test_factory_error_leaves_cache_empty() {
    let kernel = Kernel::new();
    let failed_once = Rc::new(Cell::new(false));

    let flag = Rc::clone(&failed_once);
    kernel.define_singleton("flaky", move |_kernel| {
        if !flag.get() {
            flag.set(true);
            return Err(Error::from("flaky construction failed"));
        }
        Ok(instance(7u32))
    });

    let err = kernel.get_service("flaky").unwrap_err();
    assert!(matches!(err, Error::Other(_)));

    // The failed attempt must not have been cached; the retry runs the
    // factory again and succeeds.
    let value: Rc<u32> = kernel.get_service_as("flaky").unwrap();
    assert_eq!(*value, 7);
}

#[test]
fn test_explicit_kind_tag_controls_lifetime() {
    let kernel = Kernel::new();
    let invocations = Rc::new(Cell::new(0u32));

    // An underscore-prefixed id is just an id; only the tag matters.
    let counter = Rc::clone(&invocations);
    kernel.define_service("_session", ServiceKind::Singleton, move |_kernel| {
        counter.set(counter.get() + 1);
        Ok(instance(Clock { timestamp: 1 }))
    });

    kernel.get_service("_session").unwrap();
    kernel.get_service("_session").unwrap();
    assert_eq!(invocations.get(), 1);
}
