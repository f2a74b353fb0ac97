use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObject, JsObjectType, ObjectBase, ObjectType};
use crate::runner::ds::value::JsValue;

/// Host callable: receives `this` and the argument list.
pub type NativeFunction = Rc<dyn Fn(&JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType>>;

pub struct FunctionObject {
    name: String,
    native: NativeFunction,
    object_base: ObjectBase,
}
impl FunctionObject {
    pub fn new_native<F>(name: &str, f: F) -> Self
    where
        F: Fn(&JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + 'static,
    {
        FunctionObject {
            name: name.to_string(),
            native: Rc::new(f),
            object_base: ObjectBase::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cloned out so the caller can drop its borrow of the function object
    /// before running user code.
    pub fn native(&self) -> NativeFunction {
        self.native.clone()
    }

    pub fn call(&self, this: &JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
        (self.native)(this, args)
    }
}
impl JsObject for FunctionObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn to_string(&self) -> String {
        format!("function {}() {{ [native code] }}", self.name)
    }
}

/// Wraps a closure into a callable object value.
pub fn new_function<F>(name: &str, f: F) -> JsObjectType
where
    F: Fn(&JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + 'static,
{
    Rc::new(RefCell::new(ObjectType::Function(FunctionObject::new_native(
        name, f,
    ))))
}
