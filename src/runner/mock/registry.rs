//! The mock registry: an undo log of property replacements plus an index of
//! what is currently mocked.

use std::ops::{Deref, DerefMut};

use tracing::{debug, trace, warn};

use super::config::MockConfig;
use super::index::MockedKeyIndex;
use super::types::{MockRecord, MockValue};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::{
    define_property_or_throw, delete_property_or_throw, get_own_property_descriptor,
};

#[derive(Default)]
pub struct MockRegistry {
    config: MockConfig,
    log: Vec<MockRecord>,
    index: MockedKeyIndex,
}

impl MockRegistry {
    pub fn new(config: MockConfig) -> Self {
        MockRegistry {
            config,
            log: Vec::new(),
            index: MockedKeyIndex::new(),
        }
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Replaces `target[key]` with an own, enumerable, configurable property
    /// built from `value`. The previous own descriptor (if any) is recorded so
    /// `restore` can put it back.
    pub fn mock<K, V>(&mut self, target: &JsObjectType, key: K, value: V) -> Result<(), JErrorType>
    where
        K: Into<PropertyKey>,
        V: Into<MockValue>,
    {
        let key = key.into();
        let original_descriptor = get_own_property_descriptor(target, &key);
        let was_own_property = original_descriptor.is_some();
        self.log.push(MockRecord::new(
            target.clone(),
            key.clone(),
            original_descriptor,
        ));

        if was_own_property {
            self.tolerate(delete_property_or_throw(target, &key))?;
        }
        self.index.insert(target, key.clone());

        debug!(
            key = %key,
            was_own_property,
            records = self.log.len(),
            "installing mock"
        );
        self.tolerate(define_property_or_throw(
            target,
            key,
            value.into().into_descriptor(),
        ))
    }

    /// Same as [`MockRegistry::mock`].
    pub fn muk<K, V>(&mut self, target: &JsObjectType, key: K, value: V) -> Result<(), JErrorType>
    where
        K: Into<PropertyKey>,
        V: Into<MockValue>,
    {
        self.mock(target, key, value)
    }

    /// Undoes every mock, newest first, then forgets all of them.
    ///
    /// Repeated mocks of one key each captured the state left by the one
    /// before, so unwinding in reverse ends at the state before the first.
    /// If the object model refuses an undo step in strict mode the error is
    /// returned and the records not yet undone, the failing one included,
    /// stay in the log. The index then lists exactly the keys of those
    /// records.
    pub fn restore(&mut self) -> Result<(), JErrorType> {
        if !self.log.is_empty() {
            debug!(records = self.log.len(), "restoring mocks");
        }
        while let Some(record) = self.log.last() {
            let result = if record.was_own_property() {
                match record.original_descriptor() {
                    Some(desc) => define_property_or_throw(
                        record.target(),
                        record.key().clone(),
                        desc.clone(),
                    ),
                    None => Ok(()),
                }
            } else {
                delete_property_or_throw(record.target(), record.key())
            };
            if let Err(e) = self.tolerate(result) {
                self.reindex();
                return Err(e);
            }
            self.log.pop();
        }
        self.index.clear();
        Ok(())
    }

    pub fn is_mocked<K: Into<PropertyKey>>(&self, target: &JsObjectType, key: K) -> bool {
        let key = key.into();
        let mocked = self.index.contains(target, &key);
        trace!(key = %key, mocked, "mock lookup");
        mocked
    }

    /// Keys currently mocked on `target`, in no particular order.
    pub fn mocked_keys(&self, target: &JsObjectType) -> Vec<PropertyKey> {
        self.index.keys_of(target).into_iter().collect()
    }

    /// Undo records waiting for `restore`, oldest first.
    pub fn records(&self) -> &[MockRecord] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Borrows the registry and restores it when the guard goes out of scope.
    pub fn guard(&mut self) -> MockGuard<'_> {
        MockGuard { registry: self }
    }

    fn reindex(&mut self) {
        self.index.clear();
        for record in &self.log {
            self.index.insert(record.target(), record.key().clone());
        }
    }

    fn tolerate(&self, result: Result<(), JErrorType>) -> Result<(), JErrorType> {
        match result {
            Err(e) if !self.config.strict => {
                warn!(error = %e, "ignoring refused property update");
                Ok(())
            }
            result => result,
        }
    }
}

pub struct MockGuard<'a> {
    registry: &'a mut MockRegistry,
}

impl Deref for MockGuard<'_> {
    type Target = MockRegistry;

    fn deref(&self) -> &MockRegistry {
        self.registry
    }
}

impl DerefMut for MockGuard<'_> {
    fn deref_mut(&mut self) -> &mut MockRegistry {
        self.registry
    }
}

impl Drop for MockGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.registry.restore() {
            warn!(error = %e, "restore on guard drop failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::object_property::PropertyDescriptor;
    use crate::runner::ds::operations::object::{
        create_data_property, define_property, freeze, get, has_own_property, new_object,
        object_create,
    };
    use crate::runner::ds::value::JsValue;

    fn object_with(key: &str, value: JsValue) -> JsObjectType {
        let o = new_object();
        create_data_property(&o, PropertyKey::from(key), value);
        o
    }

    #[test]
    fn test_mock_and_restore_own_property() {
        let mut registry = MockRegistry::default();
        let o = object_with("a", JsValue::from(1i64));
        registry.mock(&o, "a", 2i64).unwrap();
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(2i64));
        assert!(registry.is_mocked(&o, "a"));
        assert_eq!(registry.len(), 1);

        registry.restore().unwrap();
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
        assert!(!registry.is_mocked(&o, "a"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_one_record_per_call() {
        let mut registry = MockRegistry::default();
        let o = object_with("a", JsValue::from(1i64));
        registry.mock(&o, "a", 2i64).unwrap();
        registry.mock(&o, "a", 3i64).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.mocked_keys(&o), vec![PropertyKey::from("a")]);

        let second = &registry.records()[1];
        assert!(second.was_own_property());
        match second.original_descriptor() {
            Some(PropertyDescriptor::Data { value, .. }) => assert_eq!(*value, JsValue::from(2i64)),
            _ => panic!("second record should capture the first mock"),
        }
        registry.restore().unwrap();
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
    }

    #[test]
    fn test_inherited_key_is_not_own() {
        let mut registry = MockRegistry::default();
        let parent = object_with("a", JsValue::from(1i64));
        let child = object_create(Some(parent));
        registry.mock(&child, "a", 2i64).unwrap();
        assert!(!registry.records()[0].was_own_property());
        assert!(registry.records()[0].original_descriptor().is_none());
        registry.restore().unwrap();
        assert!(!has_own_property(&child, &PropertyKey::from("a")));
        assert_eq!(get(&child, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
    }

    #[test]
    fn test_restore_twice_is_noop() {
        let mut registry = MockRegistry::default();
        let o = object_with("a", JsValue::from(1i64));
        registry.mock(&o, "a", 2i64).unwrap();
        registry.restore().unwrap();
        create_data_property(&o, PropertyKey::from("a"), JsValue::from(5i64));
        registry.restore().unwrap();
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(5i64));
    }

    #[test]
    fn test_independent_registries() {
        let mut first = MockRegistry::default();
        let mut second = MockRegistry::default();
        let o = object_with("a", JsValue::from(1i64));
        first.mock(&o, "a", 2i64).unwrap();
        assert!(first.is_mocked(&o, "a"));
        assert!(!second.is_mocked(&o, "a"));
        second.restore().unwrap();
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(2i64));
        first.restore().unwrap();
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let mut registry = MockRegistry::default();
        let o = object_with("a", JsValue::from(1i64));
        {
            let mut guard = registry.guard();
            guard.mock(&o, "a", 2i64).unwrap();
            assert!(guard.is_mocked(&o, "a"));
        }
        assert!(registry.is_empty());
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
    }

    #[test]
    fn test_strict_mode_reports_non_configurable_property() {
        let mut registry = MockRegistry::new(MockConfig::strict());
        let o = new_object();
        define_property(
            &o,
            PropertyKey::from("a"),
            PropertyDescriptor::Data {
                value: JsValue::from(1i64),
                writable: false,
                enumerable: true,
                configurable: false,
            },
        );
        let err = registry.mock(&o, "a", 2i64).unwrap_err();
        assert!(matches!(err, JErrorType::TypeError(_)));
        // The record is pushed before the delete is attempted.
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_mocked(&o, "a"));
        // Restoring puts back the identical descriptor, which is allowed.
        registry.restore().unwrap();
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
    }

    #[test]
    fn test_sloppy_mode_ignores_frozen_target() {
        let mut registry = MockRegistry::new(MockConfig::sloppy());
        let o = object_with("a", JsValue::from(1i64));
        freeze(&o);
        registry.mock(&o, "a", 2i64).unwrap();
        registry.mock(&o, "b", 2i64).unwrap();
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
        assert!(!has_own_property(&o, &PropertyKey::from("b")));
        assert!(registry.is_mocked(&o, "b"));
        registry.restore().unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_strict_restore_failure_keeps_pending_records() {
        let mut registry = MockRegistry::default();
        let o = object_with("a", JsValue::from(1i64));
        registry.mock(&o, "x", 1i64).unwrap();
        registry.mock(&o, "a", 2i64).unwrap();
        // Lock the mocked "x" in place so deleting it fails.
        define_property(
            &o,
            PropertyKey::from("x"),
            PropertyDescriptor::Data {
                value: JsValue::from(1i64),
                writable: true,
                enumerable: true,
                configurable: false,
            },
        );
        assert!(registry.restore().is_err());
        assert_eq!(registry.len(), 1);
        assert_eq!(get(&o, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
        assert!(registry.is_mocked(&o, "x"));
        assert!(!registry.is_mocked(&o, "a"));
    }

    #[test]
    fn test_failed_restore_forgets_undone_objects() {
        let mut registry = MockRegistry::default();
        let locked = new_object();
        registry.mock(&locked, "x", 1i64).unwrap();
        for _ in 0..50 {
            let short_lived = new_object();
            registry.mock(&short_lived, "y", 1i64).unwrap();
        }
        define_property(
            &locked,
            PropertyKey::from("x"),
            PropertyDescriptor::Data {
                value: JsValue::from(1i64),
                writable: true,
                enumerable: true,
                configurable: false,
            },
        );
        assert!(registry.restore().is_err());
        assert_eq!(registry.len(), 1);

        let fresh: Vec<JsObjectType> = (0..50).map(|_| new_object()).collect();
        assert!(fresh.iter().all(|o| !registry.is_mocked(o, "y")));
        assert!(registry.is_mocked(&locked, "x"));
    }
}
