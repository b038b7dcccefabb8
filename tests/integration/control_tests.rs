//! Integration tests for control descriptors
//!
//! These tests verify the descriptors a display layer builds from a host.

use paramtree::control::{ControlKind, ControlSpec};
use paramtree::parameters::{GuiHint, Param, ParamValue, Parametrized, Scale};

fn camera() -> Parametrized {
    Parametrized::new("devices/camera")
        .param(
            "exposure",
            Param::new(0.01)
                .with_bounds(0.001, 1.0)
                .unwrap()
                .with_unit("s")
                .with_scale(Scale::Log)
                .with_description("Exposure time"),
        )
        .param(
            "gain",
            Param::new(4)
                .with_bounds(0.0, 16.0)
                .unwrap()
                .with_gui(GuiHint::Slider),
        )
        .param("binning", Param::new(1).with_choices([1, 2, 4]))
        .param("trigger", Param::new(false))
        .param("frames_acquired", Param::new(0).with_editable(false))
        .param("serial", Param::new("A123").without_gui())
}

#[test]
fn test_descriptors_follow_declaration_order() {
    let specs = camera().control_specs().unwrap();

    let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["exposure", "gain", "binning", "trigger", "frames_acquired"]
    );
}

#[test]
fn test_descriptor_contents() {
    let specs = camera().control_specs().unwrap();

    let exposure = &specs[0];
    assert_eq!(
        exposure.kind,
        ControlKind::Spin {
            min: Some(0.001),
            max: Some(1.0),
            integer: false
        }
    );
    assert_eq!(exposure.unit, "s");
    assert_eq!(exposure.scale, Some(Scale::Log));
    assert_eq!(exposure.value, ParamValue::Float(0.01));

    assert_eq!(
        specs[1].kind,
        ControlKind::Slider {
            min: 0.0,
            max: 16.0,
            integer: true
        }
    );
    assert_eq!(
        specs[2].kind,
        ControlKind::Combo {
            choices: vec![ParamValue::Int(1), ParamValue::Int(2), ParamValue::Int(4)]
        }
    );
    assert_eq!(specs[3].kind, ControlKind::Check);
    assert!(!specs[4].editable);
}

#[test]
fn test_descriptor_tracks_current_value() {
    let mut host = camera();
    host.set("binning", 4).unwrap();

    let spec = ControlSpec::from_param("binning", host.params().get("binning").unwrap()).unwrap();
    assert_eq!(spec.value, ParamValue::Int(4));
}
