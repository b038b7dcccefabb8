//! Integration tests for the Param struct
//!
//! These tests verify that parameters are constructed with the right defaults and hints.

use approx::assert_relative_eq;
use paramtree::parameters::{GuiHint, Limits, Param, ParamValue, Scale, ValueKind};
use paramtree::ParamTreeError;

#[test]
fn test_parameter_defaults() {
    let param = Param::new(1.0);

    assert_eq!(param.value(), &ParamValue::Float(1.0));
    assert_eq!(param.kind(), ValueKind::Float);
    assert!(param.limits().is_none());
    assert_eq!(param.description(), "");
    assert_eq!(param.gui(), Some(GuiHint::Spin));
    assert_eq!(param.unit(), "");
    assert!(param.scale().is_none());
    assert!(param.changed());
    assert!(param.editable());
    assert!(param.loadable());
}

#[test]
fn test_gui_hint_inference() {
    assert_eq!(Param::new(5).gui(), Some(GuiHint::Spin));
    assert_eq!(Param::new(true).gui(), Some(GuiHint::Check));
    assert_eq!(
        Param::new("x").with_choices(["x", "y", "z"]).gui(),
        Some(GuiHint::Combo)
    );
    assert_eq!(Param::new("hi").gui(), Some(GuiHint::Text));
    assert_eq!(Param::new((0.2, 0.8)).gui(), Some(GuiHint::Range));
    assert_eq!(Param::new(5).without_gui().gui(), None);
}

#[test]
fn test_bounded_parameter() {
    let param = Param::new(1.0)
        .with_bounds(-1.0, 10.0)
        .unwrap()
        .with_scale(Scale::Linear);

    assert_eq!(param.limits(), Some(&Limits::Bounds { min: -1.0, max: 10.0 }));
    assert_eq!(param.scale(), Some(Scale::Linear));

    // Initial values outside the bounds are clamped
    let param = Param::new(0.001).with_bounds(0.01, 1.0).unwrap();
    let value: f64 = param.value().try_into().unwrap();
    assert_relative_eq!(value, 0.01);

    let result = Param::new(1.0).with_bounds(1.0, -1.0);
    assert!(matches!(result, Err(ParamTreeError::InvalidLimits { .. })));
}

#[test]
fn test_parameter_metadata_serializes() {
    let param = Param::new(3)
        .with_bounds(0.0, 10.0)
        .unwrap()
        .with_description("Number of frames")
        .with_unit("frames")
        .with_loadable(false);

    let json = serde_json::to_value(&param).unwrap();
    assert_eq!(json["value"], 3);
    assert_eq!(json["gui"], "spin");
    assert_eq!(json["unit"], "frames");
    assert_eq!(json["loadable"], false);

    let back: Param = serde_json::from_value(json).unwrap();
    assert_eq!(back.value(), param.value());
    assert_eq!(back.limits(), param.limits());
    assert_eq!(back.description(), "Number of frames");
}

#[test]
fn test_bounds_must_admit_a_value_of_the_kind() {
    let result = Param::new(0).with_bounds(0.5, 0.7);
    assert!(matches!(result, Err(ParamTreeError::InvalidLimits { .. })));

    let param = Param::new(0.0).with_bounds(0.5, 0.7).unwrap();
    let value: f64 = param.value().try_into().unwrap();
    assert_relative_eq!(value, 0.5);
}
