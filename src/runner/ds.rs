//! Object model: values, property keys and descriptors, ordinary and
//! function objects, and the abstract operations over them.

pub mod error;
pub mod function_object;
pub mod object;
pub mod object_property;
pub mod operations;
pub mod symbol;
pub mod value;
