//! Property mocking.
//!
//! A [`MockRegistry`] replaces properties on objects and remembers how to put
//! them back:
//!
//! ```text
//! mock(obj, key, value)   push undo record, delete own key, mark index, define mock
//! restore()               undo records newest first, empty log and index
//! is_mocked(obj, key)     index lookup
//! ```
//!
//! Registries are plain values, so tests can build their own. The free
//! functions in [`api`] share one registry per thread, created on first use.
//!
//! ```
//! use muk::runner::ds::object_property::PropertyKey;
//! use muk::runner::ds::operations::object::{create_data_property, get, new_object};
//! use muk::runner::ds::value::JsValue;
//! use muk::runner::mock::MockRegistry;
//!
//! let obj = new_object();
//! create_data_property(&obj, PropertyKey::from("a"), JsValue::from(1i64));
//!
//! let mut registry = MockRegistry::default();
//! registry.mock(&obj, "a", 2i64).unwrap();
//! assert_eq!(get(&obj, &PropertyKey::from("a")).unwrap(), JsValue::from(2i64));
//! assert!(registry.is_mocked(&obj, "a"));
//!
//! registry.restore().unwrap();
//! assert_eq!(get(&obj, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
//! assert!(!registry.is_mocked(&obj, "a"));
//! ```

pub mod api;
pub mod config;
pub mod index;
pub mod registry;
pub mod types;

pub use api::{is_mocked, mock, muk, restore, restore_on_drop, with_default_registry};
pub use config::MockConfig;
pub use registry::{MockGuard, MockRegistry};
pub use types::{MockRecord, MockValue};
