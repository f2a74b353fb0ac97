use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::object_property::{
    same_function, PropertyDescriptor, PropertyDescriptorSetter, PropertyKey,
};
use crate::runner::ds::operations::test_and_comparison::same_value;
use crate::runner::ds::value::JsValue;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type JsObjectType = Rc<RefCell<ObjectType>>;

pub enum ObjectType {
    Ordinary(OrdinaryObject),
    Function(FunctionObject),
}
impl ObjectType {
    pub fn is_callable(&self) -> bool {
        matches!(self, ObjectType::Function(_))
    }

    pub fn as_js_object(&self) -> &dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(o) => o,
        }
    }

    pub fn as_js_object_mut(&mut self) -> &mut dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(o) => o,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionObject> {
        match self {
            ObjectType::Function(f) => Some(f),
            _ => None,
        }
    }
}
impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_js_object().to_string())
    }
}

/// Storage shared by every object kind. Own keys remember the order in which
/// they were first added; redefining an existing key keeps its position,
/// deleting it forgets the position.
pub struct ObjectBase {
    properties: HashMap<PropertyKey, PropertyDescriptor>,
    insertion_order: Vec<PropertyKey>,
    is_extensible: bool,
    prototype: Option<JsObjectType>,
}
impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: HashMap::new(),
            insertion_order: Vec::new(),
            is_extensible: true,
            prototype: None,
        }
    }

    pub fn with_prototype(prototype: Option<JsObjectType>) -> Self {
        ObjectBase {
            prototype,
            ..ObjectBase::new()
        }
    }

    fn insert_property(&mut self, property: PropertyKey, descriptor: PropertyDescriptor) {
        if !self.properties.contains_key(&property) {
            self.insertion_order.push(property.clone());
        }
        self.properties.insert(property, descriptor);
    }

    fn remove_property(&mut self, property: &PropertyKey) {
        if self.properties.remove(property).is_some() {
            self.insertion_order.retain(|k| k != property);
        }
    }

    pub(crate) fn set_prototype(&mut self, prototype: Option<JsObjectType>) {
        self.prototype = prototype;
    }
}
impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

pub trait JsObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase;

    fn get_object_base(&self) -> &ObjectBase;

    fn get_prototype_of(&self) -> Option<JsObjectType> {
        self.get_object_base().prototype.clone()
    }

    fn is_extensible(&self) -> bool {
        self.get_object_base().is_extensible
    }

    fn prevent_extensions(&mut self) -> bool {
        self.get_object_base_mut().is_extensible = false;
        true
    }

    fn get_own_property(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.get_object_base().properties.get(property)
    }

    fn has_own_property(&self, property: &PropertyKey) -> bool {
        self.get_object_base().properties.contains_key(property)
    }

    fn define_own_property(
        &mut self,
        property: PropertyKey,
        descriptor_setter: PropertyDescriptorSetter,
    ) -> bool {
        ordinary_define_own_property(self, property, descriptor_setter)
    }

    /// Returns false, leaving the property in place, when it is not configurable.
    fn delete(&mut self, property: &PropertyKey) -> bool {
        match self.get_own_property(property) {
            None => true,
            Some(pd) => {
                if pd.is_configurable() {
                    self.get_object_base_mut().remove_property(property);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Integer keys ascending, then string keys, then symbols, each in
    /// insertion order.
    fn own_property_keys(&self) -> Vec<PropertyKey> {
        let order = &self.get_object_base().insertion_order;
        let mut int_keys = order
            .iter()
            .filter_map(|k| match k {
                PropertyKey::Int(i) => Some(*i),
                _ => None,
            })
            .collect::<Vec<u32>>();
        int_keys.sort_unstable();

        let mut result = int_keys
            .into_iter()
            .map(PropertyKey::Int)
            .collect::<Vec<PropertyKey>>();
        result.extend(
            order
                .iter()
                .filter(|k| matches!(k, PropertyKey::Str(_)))
                .cloned(),
        );
        result.extend(order.iter().filter(|k| k.is_symbol()).cloned());
        result
    }

    fn to_string(&self) -> String {
        "object".to_string()
    }
}

pub struct OrdinaryObject {
    object_base: ObjectBase,
}
impl OrdinaryObject {
    pub fn new(prototype: Option<JsObjectType>) -> Self {
        OrdinaryObject {
            object_base: ObjectBase::with_prototype(prototype),
        }
    }
}
impl JsObject for OrdinaryObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn to_string(&self) -> String {
        "[object Object]".to_string()
    }
}

/// `ValidateAndApplyPropertyDescriptor` for ordinary objects. Returns false
/// when the change is not allowed; the object is left untouched in that case.
pub fn ordinary_define_own_property<J: JsObject + ?Sized>(
    o: &mut J,
    property: PropertyKey,
    descriptor_setter: PropertyDescriptorSetter,
) -> bool {
    let current = match o.get_own_property(&property) {
        Some(current) => current.clone(),
        None => {
            if !o.is_extensible() {
                return false;
            }
            o.get_object_base_mut().insert_property(
                property,
                PropertyDescriptor::new_from_property_descriptor_setter(descriptor_setter),
            );
            return true;
        }
    };

    let is_generic = descriptor_setter.is_generic_descriptor();
    let PropertyDescriptorSetter {
        honour_value,
        honour_writable,
        honour_set,
        honour_get,
        honour_enumerable,
        honour_configurable,
        descriptor,
    } = descriptor_setter;

    if !current.is_configurable() {
        if honour_configurable && descriptor.is_configurable() {
            return false;
        }
        if honour_enumerable && current.is_enumerable() != descriptor.is_enumerable() {
            return false;
        }
    }
    let enumerable = if honour_enumerable {
        descriptor.is_enumerable()
    } else {
        current.is_enumerable()
    };
    let configurable = if honour_configurable {
        descriptor.is_configurable()
    } else {
        current.is_configurable()
    };

    let mut merged = if is_generic {
        current
    } else {
        match (&current, descriptor) {
            (
                PropertyDescriptor::Data {
                    value: current_value,
                    writable: current_writable,
                    ..
                },
                PropertyDescriptor::Data {
                    value, writable, ..
                },
            ) => {
                if !current.is_configurable() && !*current_writable {
                    if honour_writable && writable {
                        return false;
                    }
                    if honour_value && !same_value(current_value, &value) {
                        return false;
                    }
                }
                PropertyDescriptor::Data {
                    value: if honour_value {
                        value
                    } else {
                        current_value.clone()
                    },
                    writable: if honour_writable {
                        writable
                    } else {
                        *current_writable
                    },
                    enumerable,
                    configurable,
                }
            }
            (
                PropertyDescriptor::Accessor {
                    set: current_set,
                    get: current_get,
                    ..
                },
                PropertyDescriptor::Accessor { set, get, .. },
            ) => {
                if !current.is_configurable() {
                    if honour_set && !same_function(current_set, &set) {
                        return false;
                    }
                    if honour_get && !same_function(current_get, &get) {
                        return false;
                    }
                }
                PropertyDescriptor::Accessor {
                    set: if honour_set { set } else { current_set.clone() },
                    get: if honour_get { get } else { current_get.clone() },
                    enumerable,
                    configurable,
                }
            }
            (_, descriptor) => {
                // Switching between data and accessor kinds.
                if !current.is_configurable() {
                    return false;
                }
                match descriptor {
                    PropertyDescriptor::Data {
                        value, writable, ..
                    } => PropertyDescriptor::Data {
                        value: if honour_value {
                            value
                        } else {
                            JsValue::Undefined
                        },
                        writable: honour_writable && writable,
                        enumerable,
                        configurable,
                    },
                    PropertyDescriptor::Accessor { set, get, .. } => PropertyDescriptor::Accessor {
                        set: if honour_set { set } else { None },
                        get: if honour_get { get } else { None },
                        enumerable,
                        configurable,
                    },
                }
            }
        }
    };
    merged.set_enumerable(enumerable);
    merged.set_configurable(configurable);
    o.get_object_base_mut().insert_property(property, merged);
    true
}
