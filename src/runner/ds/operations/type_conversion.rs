use crate::runner::ds::value::{JsNumberType, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";

/// Parses a canonical array index: decimal digits, no leading zero (except
/// "0" itself), and below 2^32 - 1.
pub fn to_array_index(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    match s.parse::<u32>() {
        Ok(i) if i < u32::MAX => Some(i),
        _ => None,
    }
}

/// `ToBoolean`.
pub fn to_boolean(value: &JsValue) -> bool {
    match value {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::Number(n) => match n {
            JsNumberType::Integer(i) => *i != 0,
            JsNumberType::Float(f) => !(*f == 0.0 || f.is_nan()),
            JsNumberType::NaN => false,
            JsNumberType::PositiveInfinity | JsNumberType::NegativeInfinity => true,
        },
        JsValue::String(s) => !s.is_empty(),
        JsValue::Symbol(_) | JsValue::Object(_) => true,
    }
}
