//! # muk - property mocking for a JavaScript object model
//!
//! Temporarily replace a property on an object (a data value, an accessor,
//! or a method) and later put the object back exactly as it was:
//! - own vs inherited vs absent properties are told apart, so restoring an
//!   inherited key re-exposes the prototype's value
//! - full descriptors (value or getter/setter, writable, enumerable,
//!   configurable) are captured and reinstated
//! - repeated mocks of the same key unwind back to the very first original
//!
//! ## Quick Start
//!
//! ```
//! use muk::runner::ds::object_property::PropertyKey;
//! use muk::runner::ds::operations::object::{create_data_property, get, has_property, new_object};
//! use muk::runner::ds::value::JsValue;
//! use muk::{is_mocked, mock, restore};
//!
//! let obj = new_object();
//! create_data_property(&obj, PropertyKey::from("a"), JsValue::from(1i64));
//!
//! mock(&obj, "a", 2i64).unwrap();
//! mock(&obj, "x", "hello").unwrap();
//! assert_eq!(get(&obj, &PropertyKey::from("a")).unwrap(), JsValue::from(2i64));
//! assert!(is_mocked(&obj, "a"));
//!
//! restore().unwrap();
//! assert_eq!(get(&obj, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
//! assert!(!has_property(&obj, &PropertyKey::from("x")));
//! assert!(!is_mocked(&obj, "a"));
//! ```
//!
//! ### Mocking with a getter
//!
//! ```
//! use muk::runner::ds::function_object::new_function;
//! use muk::runner::ds::object_property::PropertyKey;
//! use muk::runner::ds::operations::object::{create_data_property, get, new_object};
//! use muk::runner::ds::value::JsValue;
//! use muk::runner::mock::{MockRegistry, MockValue};
//!
//! let obj = new_object();
//! create_data_property(&obj, PropertyKey::from("a"), JsValue::from(1i64));
//!
//! let mut registry = MockRegistry::default();
//! let getter = new_function("get a", |_this, _args| Ok(JsValue::from(2i64)));
//! registry.mock(&obj, "a", MockValue::getter(getter)).unwrap();
//! assert_eq!(get(&obj, &PropertyKey::from("a")).unwrap(), JsValue::from(2i64));
//!
//! registry.restore().unwrap();
//! assert_eq!(get(&obj, &PropertyKey::from("a")).unwrap(), JsValue::from(1i64));
//! ```
//!
//! ## Architecture
//!
//! - **[`runner::ds`]** - Object model (values, keys, descriptors, prototypes)
//!   - **[`runner::ds::operations::object`]** - `get`/`set`/`defineProperty`/`delete`,
//!     key enumeration, `freeze`/`seal`
//! - **[`runner::mock`]** - Mock registry: undo log, mocked-key index, config
//!   - **[`runner::mock::api`]** - Free functions over a per-thread default registry

#[macro_use]
extern crate lazy_static;

pub mod runner;

pub use runner::ds::error::JErrorType;
pub use runner::mock::{is_mocked, mock, muk, restore, MockConfig, MockRegistry, MockValue};
