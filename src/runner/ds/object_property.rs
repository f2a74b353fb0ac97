use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::test_and_comparison::same_value;
use crate::runner::ds::operations::type_conversion::to_array_index;
use crate::runner::ds::symbol::SymbolData;
use crate::runner::ds::value::JsValue;

/// Property identifier. Strings that are canonical array indices are always
/// stored as `Int`, so `"1"` and `1` name the same property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
    Sym(SymbolData),
}
impl PropertyKey {
    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Sym(_))
    }
}
impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
            PropertyKey::Sym(s) => write!(f, "{}", s),
        }
    }
}
impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        match to_array_index(s) {
            Some(i) => PropertyKey::Int(i),
            None => PropertyKey::Str(s.to_string()),
        }
    }
}
impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        match to_array_index(&s) {
            Some(i) => PropertyKey::Int(i),
            None => PropertyKey::Str(s),
        }
    }
}
impl From<u32> for PropertyKey {
    fn from(i: u32) -> Self {
        PropertyKey::Int(i)
    }
}
impl From<SymbolData> for PropertyKey {
    fn from(s: SymbolData) -> Self {
        PropertyKey::Sym(s)
    }
}
impl From<&SymbolData> for PropertyKey {
    fn from(s: &SymbolData) -> Self {
        PropertyKey::Sym(s.clone())
    }
}
impl From<&PropertyKey> for PropertyKey {
    fn from(k: &PropertyKey) -> Self {
        k.clone()
    }
}

/// A possibly partial descriptor, as accepted by `[[DefineOwnProperty]]`.
/// Fields whose `honour_*` flag is false are left untouched on an existing
/// property, or take their default (`undefined`/`false`) on a new one.
pub struct PropertyDescriptorSetter {
    pub honour_value: bool,
    pub honour_writable: bool,
    pub honour_set: bool,
    pub honour_get: bool,
    pub honour_enumerable: bool,
    pub honour_configurable: bool,
    pub descriptor: PropertyDescriptor,
}
impl PropertyDescriptorSetter {
    pub fn new_from_property_descriptor(desc: PropertyDescriptor) -> Self {
        match desc {
            PropertyDescriptor::Data { .. } => PropertyDescriptorSetter {
                honour_value: true,
                honour_writable: true,
                honour_configurable: true,
                honour_enumerable: true,
                descriptor: desc,
                honour_set: false,
                honour_get: false,
            },
            PropertyDescriptor::Accessor { .. } => PropertyDescriptorSetter {
                honour_set: true,
                honour_get: true,
                honour_configurable: true,
                honour_enumerable: true,
                descriptor: desc,
                honour_value: false,
                honour_writable: false,
            },
        }
    }

    /// Only updates the value of an existing data property.
    pub fn new_value_only(value: JsValue) -> Self {
        PropertyDescriptorSetter {
            honour_value: true,
            honour_writable: false,
            honour_set: false,
            honour_get: false,
            honour_enumerable: false,
            honour_configurable: false,
            descriptor: PropertyDescriptor::Data {
                value,
                writable: false,
                enumerable: false,
                configurable: false,
            },
        }
    }

    pub(crate) fn is_generic_descriptor(&self) -> bool {
        !self.honour_get && !self.honour_set && !self.honour_value && !self.honour_writable
    }
}

#[derive(Debug, Clone)]
pub enum PropertyDescriptor {
    Data {
        value: JsValue,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        set: Option<JsObjectType>,
        get: Option<JsObjectType>,
        enumerable: bool,
        configurable: bool,
    },
}
impl PropertyDescriptor {
    /// Fills in the fields a partial descriptor leaves out with their defaults.
    pub(crate) fn new_from_property_descriptor_setter(
        desc_setter: PropertyDescriptorSetter,
    ) -> Self {
        let enumerable = desc_setter.honour_enumerable && desc_setter.descriptor.is_enumerable();
        let configurable =
            desc_setter.honour_configurable && desc_setter.descriptor.is_configurable();
        match desc_setter.descriptor {
            PropertyDescriptor::Data {
                value, writable, ..
            } => PropertyDescriptor::Data {
                value: if desc_setter.honour_value {
                    value
                } else {
                    JsValue::Undefined
                },
                writable: desc_setter.honour_writable && writable,
                enumerable,
                configurable,
            },
            PropertyDescriptor::Accessor { set, get, .. } => PropertyDescriptor::Accessor {
                set: if desc_setter.honour_set { set } else { None },
                get: if desc_setter.honour_get { get } else { None },
                enumerable,
                configurable,
            },
        }
    }

    pub fn is_enumerable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { enumerable, .. } => *enumerable,
            PropertyDescriptor::Accessor { enumerable, .. } => *enumerable,
        }
    }

    pub fn is_configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { configurable, .. } => *configurable,
            PropertyDescriptor::Accessor { configurable, .. } => *configurable,
        }
    }

    pub fn is_data_descriptor(&self) -> bool {
        match self {
            PropertyDescriptor::Data { .. } => true,
            PropertyDescriptor::Accessor { .. } => false,
        }
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        !self.is_data_descriptor()
    }

    pub fn is_writable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { writable, .. } => *writable,
            PropertyDescriptor::Accessor { .. } => false,
        }
    }

    pub(crate) fn set_enumerable(&mut self, flag: bool) {
        match self {
            PropertyDescriptor::Data { enumerable, .. } => *enumerable = flag,
            PropertyDescriptor::Accessor { enumerable, .. } => *enumerable = flag,
        }
    }

    pub(crate) fn set_configurable(&mut self, flag: bool) {
        match self {
            PropertyDescriptor::Data { configurable, .. } => *configurable = flag,
            PropertyDescriptor::Accessor { configurable, .. } => *configurable = flag,
        }
    }
}
impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                PropertyDescriptor::Data {
                    value,
                    writable,
                    enumerable,
                    configurable,
                },
                PropertyDescriptor::Data {
                    value: other_value,
                    writable: other_writable,
                    enumerable: other_enumerable,
                    configurable: other_configurable,
                },
            ) => {
                same_value(value, other_value)
                    && writable == other_writable
                    && enumerable == other_enumerable
                    && configurable == other_configurable
            }
            (
                PropertyDescriptor::Accessor {
                    set: setter,
                    get: getter,
                    enumerable,
                    configurable,
                },
                PropertyDescriptor::Accessor {
                    set: other_setter,
                    get: other_getter,
                    enumerable: other_enumerable,
                    configurable: other_configurable,
                },
            ) => {
                same_function(setter, other_setter)
                    && same_function(getter, other_getter)
                    && enumerable == other_enumerable
                    && configurable == other_configurable
            }
            _ => false,
        }
    }
}

pub(crate) fn same_function(a: &Option<JsObjectType>, b: &Option<JsObjectType>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
