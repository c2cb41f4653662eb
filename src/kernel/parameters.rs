use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::kernel::error::{Error, Result};

/// Eager store of named configuration values.
///
/// Values are stored and returned verbatim as [`serde_json::Value`]; unlike
/// services there is no lazy evaluation. Existence is independent of
/// truthiness: a stored `null` or `false` still reports as present.
#[derive(Default)]
pub struct ParameterStore {
    values: RefCell<HashMap<String, Value>>,
}

impl fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStore")
            .field("values_count", &self.values.borrow().len())
            .finish()
    }
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored value for `key`.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.values
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::UndefinedParameter { key: key.to_string() })
    }

    /// Return the stored value for `key`, deserialized as `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.get(key)?;
        serde_json::from_value(value).map_err(|source| Error::ParameterType {
            key: key.to_string(),
            expected: std::any::type_name::<T>(),
            source,
        })
    }

    /// Store `value` under `key`, overwriting unconditionally.
    pub fn set(&self, key: &str, value: Value) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }

    /// Existence check; true even when the stored value is `null` or falsy.
    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }

    /// Remove `key`; a no-op when absent.
    pub fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}
