//! Tests for the object model the mocks are installed into.

extern crate muk;

use muk::runner::ds::error::JErrorType;
use muk::runner::ds::function_object::new_function;
use muk::runner::ds::object::JsObjectType;
use muk::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use muk::runner::ds::operations::object::{
    call, create_data_property, define_property, define_property_or_throw, delete_property,
    delete_property_or_throw, for_in_keys, freeze, get, get_own_property_descriptor,
    has_own_property, is_extensible, new_object, object_create, own_property_keys,
    prevent_extensions, seal, set, set_prototype_of,
};
use muk::runner::ds::operations::test_and_comparison::{same_value, strict_equality_comparison};
use muk::runner::ds::symbol::SymbolData;
use muk::runner::ds::value::JsValue;

fn key(k: &str) -> PropertyKey {
    PropertyKey::from(k)
}

fn data(value: JsValue, writable: bool, enumerable: bool, configurable: bool) -> PropertyDescriptor {
    PropertyDescriptor::Data {
        value,
        writable,
        enumerable,
        configurable,
    }
}

mod key_order_tests {
    use super::*;

    #[test]
    fn test_integer_keys_first_then_strings_then_symbols() {
        let s = SymbolData::new("s");
        let o = new_object();
        create_data_property(&o, key("b"), JsValue::from(1i64));
        create_data_property(&o, PropertyKey::from(&s), JsValue::from(2i64));
        create_data_property(&o, key("2"), JsValue::from(3i64));
        create_data_property(&o, key("a"), JsValue::from(4i64));
        create_data_property(&o, key("0"), JsValue::from(5i64));

        assert_eq!(
            own_property_keys(&o),
            vec![
                PropertyKey::Int(0),
                PropertyKey::Int(2),
                key("b"),
                key("a"),
                PropertyKey::from(&s),
            ]
        );
    }

    #[test]
    fn test_redefine_keeps_position_delete_forgets_it() {
        let o = new_object();
        create_data_property(&o, key("a"), JsValue::from(1i64));
        create_data_property(&o, key("b"), JsValue::from(2i64));

        create_data_property(&o, key("a"), JsValue::from(10i64));
        assert_eq!(own_property_keys(&o), vec![key("a"), key("b")]);

        assert!(delete_property(&o, &key("a")));
        create_data_property(&o, key("a"), JsValue::from(1i64));
        assert_eq!(own_property_keys(&o), vec![key("b"), key("a")]);
    }

    #[test]
    fn test_for_in_respects_shadowing() {
        let parent = new_object();
        create_data_property(&parent, key("a"), JsValue::from(1i64));
        create_data_property(&parent, key("b"), JsValue::from(2i64));
        let child = object_create(Some(parent));
        define_property(&child, key("a"), data(JsValue::from(3i64), true, false, true));

        assert_eq!(for_in_keys(&child), vec![key("b")]);
    }
}

mod integrity_tests {
    use super::*;

    #[test]
    fn test_non_configurable_property_cannot_change() {
        let o = new_object();
        define_property(&o, key("x"), data(JsValue::from(1i64), false, true, false));

        match define_property_or_throw(&o, key("x"), data(JsValue::from(2i64), true, true, true)) {
            Err(JErrorType::TypeError(msg)) => assert_eq!(msg, "Cannot redefine property: x"),
            other => panic!("expected TypeError, got {:?}", other),
        }
        assert!(!delete_property(&o, &key("x")));
        assert!(delete_property_or_throw(&o, &key("x")).is_err());
        assert_eq!(get(&o, &key("x")).unwrap(), JsValue::from(1i64));
    }

    #[test]
    fn test_identical_redefinition_of_non_configurable_is_allowed() {
        let o = new_object();
        let desc = data(JsValue::from(1i64), false, false, false);
        define_property(&o, key("x"), desc.clone());

        assert!(define_property_or_throw(&o, key("x"), desc).is_ok());
    }

    #[test]
    fn test_frozen_object_ignores_writes() {
        let o = new_object();
        create_data_property(&o, key("a"), JsValue::from(1i64));
        assert!(freeze(&o));

        assert_eq!(set(&o, key("a"), JsValue::from(2i64)).unwrap(), false);
        assert_eq!(set(&o, key("b"), JsValue::from(2i64)).unwrap(), false);
        assert_eq!(get(&o, &key("a")).unwrap(), JsValue::from(1i64));
        assert!(!has_own_property(&o, &key("b")));
        assert_eq!(
            get_own_property_descriptor(&o, &key("a")),
            Some(data(JsValue::from(1i64), false, true, false))
        );
    }

    #[test]
    fn test_sealed_object_keeps_writable_data() {
        let o = new_object();
        create_data_property(&o, key("a"), JsValue::from(1i64));
        assert!(seal(&o));

        assert_eq!(set(&o, key("a"), JsValue::from(2i64)).unwrap(), true);
        assert_eq!(get(&o, &key("a")).unwrap(), JsValue::from(2i64));
        assert!(!delete_property(&o, &key("a")));
    }

    #[test]
    fn test_non_extensible_object_rejects_new_keys() {
        let o = new_object();
        assert!(prevent_extensions(&o));
        assert!(!is_extensible(&o));

        assert!(!create_data_property(&o, key("a"), JsValue::from(1i64)));
        match define_property_or_throw(&o, key("a"), data(JsValue::Undefined, true, true, true)) {
            Err(JErrorType::TypeError(msg)) => {
                assert_eq!(msg, "Cannot define property a, object is not extensible")
            }
            other => panic!("expected TypeError, got {:?}", other),
        }
    }
}

mod prototype_tests {
    use super::*;

    fn counter_setter() -> JsObjectType {
        new_function("set v", |this, args| {
            if let JsValue::Object(o) = this {
                let v = args.into_iter().next().unwrap_or(JsValue::Undefined);
                create_data_property(o, PropertyKey::from("_v"), v);
            }
            Ok(JsValue::Undefined)
        })
    }

    #[test]
    fn test_inherited_setter_receives_child_as_this() {
        let parent = new_object();
        define_property(
            &parent,
            key("v"),
            PropertyDescriptor::Accessor {
                get: None,
                set: Some(counter_setter()),
                enumerable: true,
                configurable: true,
            },
        );
        let child = object_create(Some(parent.clone()));

        assert_eq!(set(&child, key("v"), JsValue::from(7i64)).unwrap(), true);
        assert_eq!(get(&child, &key("_v")).unwrap(), JsValue::from(7i64));
        assert!(!has_own_property(&parent, &key("_v")));
        assert_eq!(get(&child, &key("v")).unwrap(), JsValue::Undefined);
    }

    #[test]
    fn test_inherited_read_only_blocks_assignment() {
        let parent = new_object();
        define_property(&parent, key("a"), data(JsValue::from(1i64), false, true, true));
        let child = object_create(Some(parent));

        assert_eq!(set(&child, key("a"), JsValue::from(2i64)).unwrap(), false);
        assert!(!has_own_property(&child, &key("a")));
    }

    #[test]
    fn test_prototype_cycle_is_rejected() {
        let a = new_object();
        let b = object_create(Some(a.clone()));

        assert!(!set_prototype_of(&a, Some(b.clone())));
        assert!(!set_prototype_of(&a, Some(a.clone())));
        assert!(set_prototype_of(&b, None));
    }

    #[test]
    fn test_calling_plain_object_is_type_error() {
        let o = new_object();
        assert!(matches!(
            call(&o, &JsValue::Undefined, vec![]),
            Err(JErrorType::TypeError(_))
        ));
    }
}

mod comparison_tests {
    use super::*;

    #[test]
    fn test_same_value_vs_strict_equality() {
        let nan = JsValue::from(f64::NAN);
        let pos = JsValue::from(0.0f64);
        let neg = JsValue::from(-0.0f64);

        assert!(same_value(&nan, &nan));
        assert!(!strict_equality_comparison(&nan, &nan));
        assert!(!same_value(&pos, &neg));
        assert!(strict_equality_comparison(&pos, &neg));
    }

    #[test]
    fn test_objects_compare_by_identity() {
        let a = new_object();
        let b = new_object();
        assert!(same_value(&JsValue::from(a.clone()), &JsValue::from(a)));
        assert!(!same_value(&JsValue::from(b), &JsValue::from(new_object())));
    }
}
