//! Free functions over the per-thread default registry.
//!
//! Objects are `Rc` based, so the default registry cannot be shared across
//! threads; each thread (and so each test in a parallel test run) gets its
//! own. Call [`restore`] in teardown, or hold a [`DefaultRestoreGuard`].

use std::cell::RefCell;

use tracing::warn;

use super::registry::MockRegistry;
use super::types::MockValue;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::PropertyKey;

thread_local! {
    static DEFAULT_REGISTRY: RefCell<MockRegistry> = RefCell::new(MockRegistry::default());
}

/// Runs `f` against the default registry. `f` must not call back into the
/// other functions of this module.
pub fn with_default_registry<R, F>(f: F) -> R
where
    F: FnOnce(&mut MockRegistry) -> R,
{
    DEFAULT_REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

pub fn mock<K, V>(target: &JsObjectType, key: K, value: V) -> Result<(), JErrorType>
where
    K: Into<PropertyKey>,
    V: Into<MockValue>,
{
    with_default_registry(|registry| registry.mock(target, key, value))
}

/// Alias of [`mock`].
pub fn muk<K, V>(target: &JsObjectType, key: K, value: V) -> Result<(), JErrorType>
where
    K: Into<PropertyKey>,
    V: Into<MockValue>,
{
    mock(target, key, value)
}

pub fn restore() -> Result<(), JErrorType> {
    with_default_registry(|registry| registry.restore())
}

pub fn is_mocked<K: Into<PropertyKey>>(target: &JsObjectType, key: K) -> bool {
    with_default_registry(|registry| registry.is_mocked(target, key))
}

/// Restores the default registry when dropped.
pub struct DefaultRestoreGuard {
    _private: (),
}

impl Drop for DefaultRestoreGuard {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            warn!(error = %e, "restore on guard drop failed");
        }
    }
}

pub fn restore_on_drop() -> DefaultRestoreGuard {
    DefaultRestoreGuard { _private: () }
}
