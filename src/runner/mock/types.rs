//! Values a property can be mocked with, and the undo record kept per mock.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::object::get;
use crate::runner::ds::operations::type_conversion::to_boolean;
use crate::runner::ds::value::JsValue;

lazy_static! {
    static ref ACCESSOR_GET_PROP: PropertyKey = PropertyKey::Str("get".to_string());
    static ref ACCESSOR_SET_PROP: PropertyKey = PropertyKey::Str("set".to_string());
}

/// Replacement installed by a mock.
#[derive(Debug, Clone)]
pub enum MockValue {
    /// Installed as a writable data property.
    Value(JsValue),
    /// Installed as an accessor property. A missing half stays undefined.
    Accessor {
        get: Option<JsObjectType>,
        set: Option<JsObjectType>,
    },
}

impl MockValue {
    /// The "no value given" case: a data property holding `undefined`.
    pub fn undefined() -> Self {
        MockValue::Value(JsValue::Undefined)
    }

    pub fn getter(get: JsObjectType) -> Self {
        MockValue::Accessor {
            get: Some(get),
            set: None,
        }
    }

    pub fn setter(set: JsObjectType) -> Self {
        MockValue::Accessor {
            get: None,
            set: Some(set),
        }
    }

    pub fn accessor(get: JsObjectType, set: JsObjectType) -> Self {
        MockValue::Accessor {
            get: Some(get),
            set: Some(set),
        }
    }

    /// Reads a host value the way a script would pass it: an object with a
    /// truthy `get` or `set` becomes an accessor, anything else (including
    /// objects whose `get`/`set` are falsy) is a plain value. A truthy half
    /// that is not a function is a `TypeError`, as in `Object.defineProperty`.
    pub fn from_js_value(value: JsValue) -> Result<Self, JErrorType> {
        if let JsValue::Object(o) = &value {
            let getter = get(o, &ACCESSOR_GET_PROP)?;
            let setter = get(o, &ACCESSOR_SET_PROP)?;
            if to_boolean(&getter) || to_boolean(&setter) {
                return Ok(MockValue::Accessor {
                    get: accessor_half(getter, "Getter")?,
                    set: accessor_half(setter, "Setter")?,
                });
            }
        }
        Ok(MockValue::Value(value))
    }

    pub(crate) fn into_descriptor(self) -> PropertyDescriptor {
        match self {
            MockValue::Accessor { get, set } if get.is_some() || set.is_some() => {
                PropertyDescriptor::Accessor {
                    get,
                    set,
                    enumerable: true,
                    configurable: true,
                }
            }
            MockValue::Accessor { .. } => data_descriptor(JsValue::Undefined),
            MockValue::Value(value) => data_descriptor(value),
        }
    }
}

fn accessor_half(value: JsValue, what: &str) -> Result<Option<JsObjectType>, JErrorType> {
    match value {
        JsValue::Object(f) if f.borrow().is_callable() => Ok(Some(f)),
        v if !to_boolean(&v) => Ok(None),
        v => Err(JErrorType::TypeError(format!(
            "{} must be a function: {}",
            what, v
        ))),
    }
}

fn data_descriptor(value: JsValue) -> PropertyDescriptor {
    PropertyDescriptor::Data {
        value,
        writable: true,
        enumerable: true,
        configurable: true,
    }
}

impl From<JsValue> for MockValue {
    fn from(v: JsValue) -> Self {
        MockValue::Value(v)
    }
}
impl From<&str> for MockValue {
    fn from(s: &str) -> Self {
        MockValue::Value(JsValue::from(s))
    }
}
impl From<String> for MockValue {
    fn from(s: String) -> Self {
        MockValue::Value(JsValue::from(s))
    }
}
impl From<bool> for MockValue {
    fn from(b: bool) -> Self {
        MockValue::Value(JsValue::from(b))
    }
}
impl From<i64> for MockValue {
    fn from(i: i64) -> Self {
        MockValue::Value(JsValue::from(i))
    }
}
impl From<f64> for MockValue {
    fn from(f: f64) -> Self {
        MockValue::Value(JsValue::from(f))
    }
}
impl From<JsObjectType> for MockValue {
    fn from(o: JsObjectType) -> Self {
        MockValue::Value(JsValue::Object(o))
    }
}
impl From<()> for MockValue {
    fn from(_: ()) -> Self {
        MockValue::undefined()
    }
}

/// Undo record: the state of `target[key]` right before one mock call.
pub struct MockRecord {
    target: JsObjectType,
    key: PropertyKey,
    original_descriptor: Option<PropertyDescriptor>,
    was_own_property: bool,
}

impl MockRecord {
    pub(crate) fn new(
        target: JsObjectType,
        key: PropertyKey,
        original_descriptor: Option<PropertyDescriptor>,
    ) -> Self {
        MockRecord {
            was_own_property: original_descriptor.is_some(),
            target,
            key,
            original_descriptor,
        }
    }

    pub fn target(&self) -> &JsObjectType {
        &self.target
    }

    pub fn key(&self) -> &PropertyKey {
        &self.key
    }

    /// `None` when the key was inherited or absent.
    pub fn original_descriptor(&self) -> Option<&PropertyDescriptor> {
        self.original_descriptor.as_ref()
    }

    pub fn was_own_property(&self) -> bool {
        self.was_own_property
    }
}
