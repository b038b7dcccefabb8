//! Integration tests for the ParameterTree
//!
//! These tests verify snapshot and restore of whole trees, including stale input.

use crate::test_helpers::gino_pino_tree;
use paramtree::parameters::state::{from_json_value, to_json_value};
use paramtree::parameters::{
    Param, ParamValue, ParameterTree, Parametrized, SkipReason, StateNode,
};
use serde_json::json;

#[test]
fn test_end_to_end_scenario() {
    let (tree, gino, _pino) = gino_pino_tree();

    let snap = tree.serialize();
    assert_eq!(
        to_json_value(&snap).unwrap(),
        json!({"a": {"gino": {"count": 1, "label": "x"}}, "b": {"pino": {"n": 4}}})
    );

    gino.borrow_mut().set("count", 10).unwrap();
    assert_ne!(tree.serialize(), snap);

    tree.deserialize(&snap);
    assert_eq!(tree.serialize(), snap);
}

#[test]
fn test_round_trip_fixed_point() {
    let mut tree = ParameterTree::new();
    Parametrized::new("a/x")
        .param("an_int", Param::new(1))
        .param("a_float", Param::new(1.0).with_bounds(-1.0, 10.0).unwrap())
        .param("a_str", Param::new("strstr"))
        .param("a_list", Param::new("a").with_choices(["a", "b", "c"]))
        .into_tree(&mut tree);
    Parametrized::new("b/c/y")
        .param("an_int", Param::new(4))
        .param("a_float", Param::new(1.0).with_bounds(-1.0, 10.0).unwrap())
        .into_tree(&mut tree);

    let once = tree.serialize();
    let report = tree.deserialize(&once);
    assert!(report.is_complete());
    assert_eq!(report.restored, 6);
    assert_eq!(tree.serialize(), once);
}

#[test]
fn test_tolerant_restore_with_stale_entries() {
    let (tree, gino, pino) = gino_pino_tree();
    let snap = tree.serialize();

    gino.borrow_mut().set("label", "z").unwrap();
    pino.borrow_mut().set("n", 40).unwrap();

    // Inject leaves that no longer exist in the tree
    let mut stale = snap.clone();
    if let Some(StateNode::Branch(a)) = stale.get_mut("a") {
        if let Some(StateNode::Branch(gino_state)) = a.get_mut("gino") {
            gino_state.insert("renamed".to_string(), StateNode::Leaf(ParamValue::Int(3)));
        }
    }
    stale.insert(
        "removed".to_string(),
        StateNode::Leaf(ParamValue::from("old host")),
    );

    let report = tree.deserialize(&stale);
    assert_eq!(report.skipped.len(), 2);
    assert!(report
        .skipped
        .iter()
        .any(|s| s.path == "a/gino/renamed" && s.reason == SkipReason::UnknownParameter));
    assert!(report
        .skipped
        .iter()
        .any(|s| s.path == "removed" && s.reason == SkipReason::UnknownObject));

    assert_eq!(tree.serialize(), snap);
}

#[test]
fn test_non_loadable_parameter_is_kept() {
    let mut tree = ParameterTree::new();
    let host = Parametrized::new("acq/camera")
        .param("exposure", Param::new(0.1))
        .param("frames_acquired", Param::new(0).with_loadable(false))
        .into_tree(&mut tree);

    let snap = tree.serialize();
    host.borrow_mut().set("frames_acquired", 120).unwrap();
    host.borrow_mut().set("exposure", 0.5).unwrap();

    let report = tree.deserialize(&snap);
    assert_eq!(report.restored, 1);
    assert_eq!(report.skipped[0].reason, SkipReason::NotLoadable);

    let host = host.borrow();
    assert_eq!(host.value::<i64>("frames_acquired").unwrap(), 120);
    assert_eq!(host.value::<f64>("exposure").unwrap(), 0.1);

    // Still reported by serialize
    assert_eq!(
        to_json_value(&tree.serialize()).unwrap(),
        json!({"acq": {"camera": {"exposure": 0.1, "frames_acquired": 120}}})
    );
}

#[test]
fn test_last_write_wins_registration() {
    let mut tree = ParameterTree::new();
    Parametrized::new("dup")
        .param("first", Param::new(1))
        .into_tree(&mut tree);
    Parametrized::new("dup")
        .param("second", Param::new(2))
        .into_tree(&mut tree);

    assert_eq!(
        to_json_value(&tree.serialize()).unwrap(),
        json!({"dup": {"second": 2}})
    );
}

#[test]
fn test_restore_widens_integers_from_hand_edited_files() {
    let mut tree = ParameterTree::new();
    let host = Parametrized::new("stage")
        .param("speed", Param::new(2.5))
        .into_tree(&mut tree);

    let edited = from_json_value(json!({"stage": {"speed": 3}})).unwrap();
    assert!(tree.deserialize(&edited).is_complete());
    assert_eq!(host.borrow().value::<f64>("speed").unwrap(), 3.0);
}

#[test]
fn test_restore_rejects_wrong_kind_without_aborting() {
    let (tree, gino, pino) = gino_pino_tree();

    let state = from_json_value(json!({
        "a": {"gino": {"count": "eleven", "label": "y"}},
        "b": {"pino": {"n": 7}}
    }))
    .unwrap();

    let report = tree.deserialize(&state);
    assert_eq!(report.restored, 2);
    assert!(matches!(report.skipped[0].reason, SkipReason::Rejected(_)));

    assert_eq!(gino.borrow().value::<i64>("count").unwrap(), 1);
    assert_eq!(gino.borrow().value::<String>("label").unwrap(), "y");
    assert_eq!(pino.borrow().value::<i64>("n").unwrap(), 7);
}

#[test]
fn test_restore_rejects_inverted_range() {
    let mut tree = ParameterTree::new();
    let host = Parametrized::new("view")
        .param("window", Param::new((0.2, 0.8)).with_bounds(0.0, 1.0).unwrap())
        .param("zoom", Param::new(1.0))
        .into_tree(&mut tree);

    let state = from_json_value(json!({"view": {"window": [0.9, 0.1], "zoom": 2.0}})).unwrap();
    let report = tree.deserialize(&state);

    assert_eq!(report.restored, 1);
    assert_eq!(report.skipped[0].path, "view/window");
    assert!(matches!(report.skipped[0].reason, SkipReason::Rejected(_)));
    assert_eq!(host.borrow().value::<(f64, f64)>("window").unwrap(), (0.2, 0.8));
    assert_eq!(host.borrow().value::<f64>("zoom").unwrap(), 2.0);
}

#[test]
fn test_bounded_integer_snapshot_restores() {
    let mut tree = ParameterTree::new();
    let host = Parametrized::new("rig")
        .param("n", Param::new(0).with_bounds(0.5, 3.0).unwrap())
        .into_tree(&mut tree);

    let snap = tree.serialize();
    host.borrow_mut().set("n", 3).unwrap();

    assert!(tree.deserialize(&snap).is_complete());
    assert_eq!(host.borrow().value::<i64>("n").unwrap(), 1);
}
