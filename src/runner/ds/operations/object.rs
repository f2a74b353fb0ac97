use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObject, JsObjectType, ObjectType, OrdinaryObject};
use crate::runner::ds::object_property::{
    PropertyDescriptor, PropertyDescriptorSetter, PropertyKey,
};
use crate::runner::ds::value::JsValue;

/// `{}` with no prototype.
pub fn new_object() -> JsObjectType {
    object_create(None)
}

/// `Object.create(prototype)`.
pub fn object_create(prototype: Option<JsObjectType>) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Ordinary(OrdinaryObject::new(
        prototype,
    ))))
}

pub fn get_prototype_of(o: &JsObjectType) -> Option<JsObjectType> {
    o.borrow().as_js_object().get_prototype_of()
}

/// Fails on a non-extensible object or when the new chain would loop back
/// to `o`.
pub fn set_prototype_of(o: &JsObjectType, prototype: Option<JsObjectType>) -> bool {
    let mut p = prototype.clone();
    while let Some(some_p) = p {
        if Rc::ptr_eq(&some_p, o) {
            return false;
        }
        p = get_prototype_of(&some_p);
    }
    let mut o = o.borrow_mut();
    let o = o.as_js_object_mut();
    if !o.is_extensible() {
        return false;
    }
    o.get_object_base_mut().set_prototype(prototype);
    true
}

pub fn get_own_property_descriptor(o: &JsObjectType, p: &PropertyKey) -> Option<PropertyDescriptor> {
    o.borrow().as_js_object().get_own_property(p).cloned()
}

pub fn has_own_property(o: &JsObjectType, p: &PropertyKey) -> bool {
    o.borrow().as_js_object().has_own_property(p)
}

/// The `in` operator: looks through the prototype chain.
pub fn has_property(o: &JsObjectType, p: &PropertyKey) -> bool {
    let mut current = Some(o.clone());
    while let Some(c) = current {
        if has_own_property(&c, p) {
            return true;
        }
        current = get_prototype_of(&c);
    }
    false
}

pub fn is_callable(v: &JsValue) -> bool {
    match v {
        JsValue::Object(o) => o.borrow().is_callable(),
        _ => false,
    }
}

pub fn call(f: &JsObjectType, this: &JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    let native = match f.borrow().as_function() {
        Some(func) => func.native(),
        None => {
            return Err(JErrorType::TypeError(
                "object is not a function".to_string(),
            ))
        }
    };
    native(this, args)
}

pub fn get(o: &JsObjectType, p: &PropertyKey) -> Result<JsValue, JErrorType> {
    ordinary_get(o, p, &JsValue::Object(o.clone()))
}

fn ordinary_get(o: &JsObjectType, p: &PropertyKey, receiver: &JsValue) -> Result<JsValue, JErrorType> {
    let (desc, prototype) = {
        let o = o.borrow();
        let o = o.as_js_object();
        (o.get_own_property(p).cloned(), o.get_prototype_of())
    };
    match desc {
        None => match prototype {
            None => Ok(JsValue::Undefined),
            Some(parent) => ordinary_get(&parent, p, receiver),
        },
        Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
        Some(PropertyDescriptor::Accessor { get, .. }) => match get {
            None => Ok(JsValue::Undefined),
            Some(getter) => call(&getter, receiver, Vec::new()),
        },
    }
}

/// Assignment (`o[p] = v`). Returns false where a sloppy-mode assignment
/// would be silently ignored: read-only data, an accessor without a setter,
/// or a non-extensible receiver.
pub fn set(o: &JsObjectType, p: PropertyKey, v: JsValue) -> Result<bool, JErrorType> {
    ordinary_set(o, p, v, &JsValue::Object(o.clone()))
}

fn ordinary_set(
    o: &JsObjectType,
    p: PropertyKey,
    v: JsValue,
    receiver: &JsValue,
) -> Result<bool, JErrorType> {
    let (desc, prototype) = {
        let o = o.borrow();
        let o = o.as_js_object();
        (o.get_own_property(&p).cloned(), o.get_prototype_of())
    };
    let desc = match desc {
        Some(desc) => desc,
        None => match prototype {
            Some(parent) => return ordinary_set(&parent, p, v, receiver),
            None => PropertyDescriptor::Data {
                value: JsValue::Undefined,
                writable: true,
                enumerable: true,
                configurable: true,
            },
        },
    };
    match desc {
        PropertyDescriptor::Data { writable, .. } => {
            if !writable {
                return Ok(false);
            }
            let receiver = match receiver {
                JsValue::Object(r) => r,
                _ => return Ok(false),
            };
            let existing = get_own_property_descriptor(receiver, &p);
            let mut receiver = receiver.borrow_mut();
            let receiver = receiver.as_js_object_mut();
            match existing {
                Some(existing) => {
                    if existing.is_accessor_descriptor() || !existing.is_writable() {
                        Ok(false)
                    } else {
                        Ok(receiver
                            .define_own_property(p, PropertyDescriptorSetter::new_value_only(v)))
                    }
                }
                None => Ok(receiver.define_own_property(
                    p,
                    PropertyDescriptorSetter::new_from_property_descriptor(
                        PropertyDescriptor::Data {
                            value: v,
                            writable: true,
                            enumerable: true,
                            configurable: true,
                        },
                    ),
                )),
            }
        }
        PropertyDescriptor::Accessor { set, .. } => match set {
            None => Ok(false),
            Some(setter) => {
                call(&setter, receiver, vec![v])?;
                Ok(true)
            }
        },
    }
}

/// `CreateDataProperty`: a writable, enumerable, configurable own property.
pub fn create_data_property(o: &JsObjectType, p: PropertyKey, v: JsValue) -> bool {
    define_property(
        o,
        p,
        PropertyDescriptor::Data {
            value: v,
            writable: true,
            enumerable: true,
            configurable: true,
        },
    )
}

pub fn define_property(o: &JsObjectType, p: PropertyKey, desc: PropertyDescriptor) -> bool {
    o.borrow_mut()
        .as_js_object_mut()
        .define_own_property(p, PropertyDescriptorSetter::new_from_property_descriptor(desc))
}

/// `Object.defineProperty`: a rejected definition is a `TypeError`.
pub fn define_property_or_throw(
    o: &JsObjectType,
    p: PropertyKey,
    desc: PropertyDescriptor,
) -> Result<(), JErrorType> {
    let message = if has_own_property(o, &p) {
        format!("Cannot redefine property: {}", p)
    } else {
        format!("Cannot define property {}, object is not extensible", p)
    };
    if define_property(o, p, desc) {
        Ok(())
    } else {
        Err(JErrorType::TypeError(message))
    }
}

pub fn delete_property(o: &JsObjectType, p: &PropertyKey) -> bool {
    o.borrow_mut().as_js_object_mut().delete(p)
}

/// Strict-mode `delete`: a non-configurable property is a `TypeError`.
pub fn delete_property_or_throw(o: &JsObjectType, p: &PropertyKey) -> Result<(), JErrorType> {
    if delete_property(o, p) {
        Ok(())
    } else {
        Err(JErrorType::TypeError(format!(
            "Cannot delete property '{}' of {}",
            p,
            o.borrow().as_js_object().to_string()
        )))
    }
}

pub fn own_property_keys(o: &JsObjectType) -> Vec<PropertyKey> {
    o.borrow().as_js_object().own_property_keys()
}

/// `Object.keys`: own enumerable non-symbol keys.
pub fn keys(o: &JsObjectType) -> Vec<PropertyKey> {
    let o = o.borrow();
    let o = o.as_js_object();
    o.own_property_keys()
        .into_iter()
        .filter(|k| !k.is_symbol())
        .filter(|k| o.get_own_property(k).map_or(false, |d| d.is_enumerable()))
        .collect()
}

/// Keys visited by `for (k in o)`: enumerable non-symbol keys along the
/// prototype chain. A key seen on a nearer object hides it further up, even
/// when the nearer one is not enumerable.
pub fn for_in_keys(o: &JsObjectType) -> Vec<PropertyKey> {
    let mut visited = HashSet::new();
    let mut result = vec![];
    let mut current = Some(o.clone());
    while let Some(c) = current {
        {
            let obj = c.borrow();
            let obj = obj.as_js_object();
            for k in obj.own_property_keys() {
                if k.is_symbol() || !visited.insert(k.clone()) {
                    continue;
                }
                if obj.get_own_property(&k).map_or(false, |d| d.is_enumerable()) {
                    result.push(k);
                }
            }
        }
        current = get_prototype_of(&c);
    }
    result
}

pub fn prevent_extensions(o: &JsObjectType) -> bool {
    o.borrow_mut().as_js_object_mut().prevent_extensions()
}

pub fn is_extensible(o: &JsObjectType) -> bool {
    o.borrow().as_js_object().is_extensible()
}

/// `Object.seal`: no new properties, existing ones become non-configurable.
pub fn seal(o: &JsObjectType) -> bool {
    set_integrity_level(o, false)
}

/// `Object.freeze`: sealed, and data properties become read-only.
pub fn freeze(o: &JsObjectType) -> bool {
    set_integrity_level(o, true)
}

fn set_integrity_level(o: &JsObjectType, frozen: bool) -> bool {
    let mut o = o.borrow_mut();
    let o = o.as_js_object_mut();
    if !o.prevent_extensions() {
        return false;
    }
    for k in o.own_property_keys() {
        let writable_too = frozen
            && o
                .get_own_property(&k)
                .map_or(false, |d| d.is_data_descriptor());
        let setter = PropertyDescriptorSetter {
            honour_value: false,
            honour_writable: writable_too,
            honour_set: false,
            honour_get: false,
            honour_enumerable: false,
            honour_configurable: true,
            descriptor: PropertyDescriptor::Data {
                value: JsValue::Undefined,
                writable: false,
                enumerable: false,
                configurable: false,
            },
        };
        if !o.define_own_property(k, setter) {
            return false;
        }
    }
    true
}
