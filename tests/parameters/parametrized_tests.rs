//! Integration tests for Parametrized hosts
//!
//! These tests verify value transparency, change tracking and bulk access.

use paramtree::parameters::{Param, ParamChange, ParamValue, Parametrized, ValueMap};
use paramtree::ParamTreeError;
use std::cell::RefCell;
use std::rc::Rc;

fn test_host() -> Parametrized {
    Parametrized::new("")
        .param("x", Param::new(1.0))
        .param("tuple_param", Param::new((10.0, 20.0)))
}

#[test]
fn test_construct_and_track() {
    let mut tc = test_host();
    assert_eq!(tc.value::<f64>("x").unwrap(), 1.0);

    tc.set("x", 2.0).unwrap();
    assert_eq!(tc.value::<f64>("x").unwrap(), 2.0);
    assert!(tc.params().get("x").unwrap().changed());

    tc.acknowledge_changes();
    assert!(!tc.params().get("x").unwrap().changed());

    tc.set("x", 3.0).unwrap();
    assert_eq!(tc.value::<f64>("x").unwrap(), 3.0);
    assert!(tc.params().get("x").unwrap().changed());

    tc.params_mut().acknowledge_changes();
    assert!(!tc.params().get("x").unwrap().changed());
    assert_eq!(tc.params().get("x").unwrap().value(), &ParamValue::Float(3.0));
}

#[test]
fn test_same_value_write_stays_clean() {
    let mut tc = test_host();
    tc.acknowledge_changes();

    tc.set("tuple_param", (10.0, 20.0)).unwrap();
    assert!(tc.params().changed_values().is_empty());

    tc.set("tuple_param", (12.0, 20.0)).unwrap();
    let changed = tc.params().changed_values();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed["tuple_param"], ParamValue::Range(12.0, 20.0));
}

#[test]
fn test_params_from_function_style_mapping() {
    let declared = vec![("x", Param::new(0.5)), ("y", Param::new("ABCDF"))];
    let p = Parametrized::with_params("", declared);

    assert_eq!(p.value::<f64>("x").unwrap(), 0.5);
    assert_eq!(p.value::<String>("y").unwrap(), "ABCDF");
}

#[test]
fn test_container_reflects_late_additions() {
    let mut host = test_host();
    assert_eq!(host.params().len(), 2);

    host.set_param("late", Param::new(false));
    host.set("plain", 1).unwrap();

    assert_eq!(host.params().len(), 3);
    assert_eq!(
        host.params().names(),
        vec!["x".to_string(), "tuple_param".to_string(), "late".to_string()]
    );
    assert!(host.params().values().contains_key("late"));
    assert!(!host.params().values().contains_key("plain"));
}

#[test]
fn test_bulk_values_idempotent() {
    let mut host = test_host();
    let before = host.params().values();
    let changed_before = host.params().changed_values();

    let values = host.params().values();
    host.set_values(values).unwrap();

    assert_eq!(host.params().values(), before);
    assert_eq!(host.params().changed_values(), changed_before);
}

#[test]
fn test_bulk_unknown_key_fails() {
    let mut host = test_host();

    let mut values = ValueMap::new();
    values.insert("x".to_string(), ParamValue::Float(8.0));
    values.insert("nope".to_string(), ParamValue::Float(1.0));

    match host.set_values(values) {
        Err(ParamTreeError::KeyNotFound(key)) => assert_eq!(key, "nope"),
        other => panic!("Expected KeyNotFound, got {:?}", other),
    }
    // Nothing from the failed batch was applied
    assert_eq!(host.value::<f64>("x").unwrap(), 1.0);
}

#[test]
fn test_redefine_parameter_constraints() {
    let mut host = Parametrized::new("").param("mode", Param::new("a").with_choices(["a", "b"]));
    assert!(host.set("mode", "c").is_err());

    host.set_param("mode", Param::new("a").with_choices(["a", "b", "c"]));
    host.set("mode", "c").unwrap();
    assert_eq!(host.value::<String>("mode").unwrap(), "c");
}

#[test]
fn test_observers_see_changes_in_order() {
    let mut host = test_host();
    let log: Rc<RefCell<Vec<ParamChange>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&log);
    host.on_change(move |change| sink.borrow_mut().push(change.clone()));

    host.set("x", 5.0).unwrap();
    host.set("tuple_param", (0.0, 1.0)).unwrap();

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].name, "x");
    assert_eq!(log[0].value, ParamValue::Float(5.0));
    assert_eq!(log[1].name, "tuple_param");
}
