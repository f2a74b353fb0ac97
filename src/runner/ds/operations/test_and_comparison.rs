use crate::runner::ds::value::{JsNumberType, JsValue};
use std::rc::Rc;

fn number_as_f64(n: &JsNumberType) -> f64 {
    match n {
        JsNumberType::Integer(i) => *i as f64,
        JsNumberType::Float(f) => *f,
        JsNumberType::NaN => f64::NAN,
        JsNumberType::PositiveInfinity => f64::INFINITY,
        JsNumberType::NegativeInfinity => f64::NEG_INFINITY,
    }
}

fn is_same_value(a: &JsValue, b: &JsValue, strict_mode: bool) -> bool {
    match (a, b) {
        (JsValue::Undefined, JsValue::Undefined) => true,
        (JsValue::Null, JsValue::Null) => true,
        (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
        (JsValue::String(a), JsValue::String(b)) => a == b,
        (JsValue::Symbol(a), JsValue::Symbol(b)) => a == b,
        (JsValue::Object(a), JsValue::Object(b)) => Rc::ptr_eq(a, b),
        (JsValue::Number(na), JsValue::Number(nb)) => {
            let (x, y) = (number_as_f64(na), number_as_f64(nb));
            if x.is_nan() || y.is_nan() {
                !strict_mode && x.is_nan() && y.is_nan()
            } else if !strict_mode && x == 0.0 && y == 0.0 {
                x.is_sign_negative() == y.is_sign_negative()
            } else {
                x == y
            }
        }
        _ => false,
    }
}

/// `SameValue`: NaN equals NaN, +0 and -0 differ.
pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, false)
}

/// `===`: NaN never equals anything, +0 equals -0.
pub fn strict_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, true)
}
