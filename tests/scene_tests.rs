//! Scene Pipeline Tests
//!
//! Tests for:
//! - Reference-configuration documents (mesh, skin, joint nodes)
//! - Named state sequences baked into an animation
//! - Single states written as a deformed pose with centerlines
//! - GLB container layout and file output

use glam::{Mat3, Vec3};
use gltf::json;
use gltf::json::accessor::{ComponentType, GenericComponentType};
use gltf::json::animation::Interpolation;
use gltf::json::buffer::Target;
use gltf::json::mesh::Semantic;
use gltf::json::validation::Checked::Valid;

use elastica::animation::Sampler;
use elastica::{
    BasicState, CrossSectionOutline, ElementResponse, FrameElement, GltfDocument, Model, ResponseInput,
    SceneSettings, build_scene,
};

const EPSILON: f32 = 1e-5;

fn portal() -> Model {
    let mut model = Model::new();
    let left = Vec3::ZERO;
    let top_left = Vec3::new(0.0, 0.0, 3.0);
    let top_right = Vec3::new(4.0, 0.0, 3.0);
    for (name, start, end) in [("left", left, top_left), ("beam", top_left, top_right)] {
        let q = FrameElement::orientation_from_axis(end - start, Vec3::Z);
        model.add_element(FrameElement::straight(name, start, end, 2, q));
        model.set_outline(name, CrossSectionOutline::rectangle(0.3, 0.5));
    }
    model
}

fn sway(amount: f32) -> BasicState {
    let response = ElementResponse::new(vec![Vec3::ZERO, Vec3::new(amount, 0.0, 0.0)], vec![Mat3::IDENTITY; 2]);
    BasicState::new()
        .with_element("left", response)
        .with_element("beam", ElementResponse::uniform_translation(2, Vec3::new(amount, 0.0, 0.0)))
}

fn no_response() -> Option<&'static ResponseInput<BasicState>> {
    None
}

// ============================================================================
// Reference configuration
// ============================================================================

#[test]
fn reference_scene_layout() {
    let output = build_scene(&portal(), no_response(), &SceneSettings::default()).unwrap();
    let root = &output.document.root;

    // 4 joint nodes + the mesh node
    assert_eq!(root.nodes.len(), 5);
    assert_eq!(root.scenes[0].nodes.len(), 5);
    assert_eq!(root.skins.len(), 1);
    assert_eq!(root.skins[0].joints.len(), 4);
    assert_eq!(root.skins[0].name.as_deref(), Some("FrameExtrusionSkin"));
    assert_eq!(root.meshes[0].name.as_deref(), Some("FrameExtrusionMesh"));
    assert!(root.animations.is_empty());
    assert!(output.clip.is_none());

    let primitive = &root.meshes[0].primitives[0];
    let position = &root.accessors[primitive.attributes[&Valid(Semantic::Positions)].value()];
    assert!(matches!(position.component_type, Valid(GenericComponentType(ComponentType::F32))));
    assert_eq!(position.count.0, 16);
    let indices = &root.accessors[primitive.indices.unwrap().value()];
    assert!(matches!(indices.component_type, Valid(GenericComponentType(ComponentType::U16))));
    assert_eq!(indices.count.0, 24 * 3);

    let position_view = &root.buffer_views[position.buffer_view.unwrap().value()];
    assert!(matches!(position_view.target, Some(Valid(Target::ArrayBuffer))));
    assert_eq!(position_view.byte_length.0, 16 * 12);
    let index_view = &root.buffer_views[indices.buffer_view.unwrap().value()];
    assert!(matches!(index_view.target, Some(Valid(Target::ElementArrayBuffer))));
    assert!(
        root.buffer_views
            .iter()
            .all(|v| v.byte_offset.as_ref().map_or(0, |o| o.0) % 4 == 0)
    );
}

#[test]
fn empty_model_yields_an_empty_scene() {
    let output = build_scene(&Model::new(), no_response(), &SceneSettings::default()).unwrap();
    let root = &output.document.root;
    assert!(root.nodes.is_empty());
    assert!(root.meshes.is_empty());
    assert!(root.buffers.is_empty());
    assert_eq!(root.scenes.len(), 1);
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn named_states_become_an_animation() {
    let states: Vec<(String, BasicState)> = [("step-0", 0.0), ("step-1", 0.1), ("step-2", 0.2)]
        .into_iter()
        .map(|(name, amount)| (name.to_string(), sway(amount)))
        .collect();
    let settings = SceneSettings {
        time_step: 0.5,
        ..SceneSettings::default()
    };

    let output = build_scene(&portal(), Some(&ResponseInput::Named(states)), &settings).unwrap();
    let root = &output.document.root;
    let clip = output.clip.unwrap();

    assert_eq!(clip.channels.len(), 8);
    assert!((clip.duration - 1.0).abs() < EPSILON);
    assert_eq!(root.animations.len(), 1);
    let animation = &root.animations[0];
    assert_eq!(animation.name.as_deref(), Some("BeamDeformations"));
    assert_eq!(animation.channels.len(), 8);
    assert!(
        animation
            .samplers
            .iter()
            .all(|s| matches!(s.interpolation, Valid(Interpolation::Linear)))
    );

    let times = &root.accessors[animation.samplers[0].input.value()];
    assert_eq!(times.count.0, 3);
    assert_eq!(times.min, Some(json::Value::from(vec![0.0_f32])));
    assert_eq!(times.max, Some(json::Value::from(vec![1.0_f32])));

    // Joint nodes stay in the reference pose; motion lives in the animation.
    let top_left = root.nodes[1].translation.unwrap();
    assert!((Vec3::from_array(top_left) - Vec3::new(0.0, 0.0, 3.0)).length() < EPSILON);
}

#[test]
fn named_states_keep_their_given_order() {
    // "step-10" sorts before "step-2" by name; replay must follow the list.
    let states: Vec<(String, BasicState)> = (0..11).map(|k| (format!("step-{k}"), sway(k as f32))).collect();
    let settings = SceneSettings {
        time_step: 0.5,
        ..SceneSettings::default()
    };

    let output = build_scene(&portal(), Some(&ResponseInput::Named(states)), &settings).unwrap();
    let clip = output.clip.unwrap();
    assert!((clip.duration - 5.0).abs() < EPSILON);

    let mut swept = 0.0_f32;
    for sampler in &clip.samplers {
        let Sampler::Translation(track) = sampler else {
            continue;
        };
        assert_eq!(track.times.len(), 11);
        assert!(track.values.windows(2).all(|w| w[1].x >= w[0].x - EPSILON));
        swept = swept.max(track.values[10].x - track.values[0].x);
    }
    assert!((swept - 10.0).abs() < EPSILON);
}

#[test]
fn states_outside_the_model_write_no_animation() {
    let states = vec![(
        "only".to_string(),
        BasicState::new().with_element("ghost", ElementResponse::uniform_translation(2, Vec3::ONE)),
    )];
    let output = build_scene(&portal(), Some(&ResponseInput::Named(states)), &SceneSettings::default()).unwrap();

    assert!(output.clip.unwrap().channels.is_empty());
    assert!(output.document.root.animations.is_empty());
}

// ============================================================================
// Single state
// ============================================================================

#[test]
fn single_state_poses_joint_nodes() {
    let input = ResponseInput::Single(sway(0.25));
    let output = build_scene(&portal(), Some(&input), &SceneSettings::default()).unwrap();
    let root = &output.document.root;

    let top_left = Vec3::from_array(root.nodes[1].translation.unwrap());
    assert!((top_left - Vec3::new(0.25, 0.0, 3.0)).length() < EPSILON);
    assert!(output.clip.is_none());
    assert!(root.animations.is_empty());
}

#[test]
fn single_state_centerlines() {
    let mut displacements = vec![0.0; 12];
    displacements[6] = 0.25;
    let state = BasicState::new().with_element(
        "left",
        ElementResponse::uniform_translation(2, Vec3::ZERO).with_end_displacements(displacements),
    );
    let settings = SceneSettings {
        centerline_samples: 9,
        ..SceneSettings::default()
    };

    let output = build_scene(&portal(), Some(&ResponseInput::Single(state)), &settings).unwrap();
    let root = &output.document.root;

    assert_eq!(root.meshes.len(), 2);
    let line = &root.meshes[1];
    assert_eq!(line.name.as_deref(), Some("leftCenterline"));
    let points = &root.accessors[line.primitives[0].attributes[&Valid(Semantic::Positions)].value()];
    assert_eq!(points.count.0, 9);
    let max: Vec<f64> = points
        .max
        .as_ref()
        .and_then(json::Value::as_array)
        .unwrap()
        .iter()
        .filter_map(json::Value::as_f64)
        .collect();
    assert!((max[0] - 0.25).abs() < 1e-5);
    assert!((max[2] - 3.0).abs() < 1e-5);
}

// ============================================================================
// GLB
// ============================================================================

#[test]
fn glb_header_and_chunks() {
    let output = build_scene(&portal(), no_response(), &SceneSettings::default()).unwrap();
    let glb = output.document.to_glb().unwrap();

    assert_eq!(&glb[0..4], b"glTF");
    assert_eq!(u32::from_le_bytes(glb[4..8].try_into().unwrap()), 2);
    assert_eq!(u32::from_le_bytes(glb[8..12].try_into().unwrap()) as usize, glb.len());
    assert_eq!(&glb[16..20], b"JSON");

    let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
    let bin_header = 20 + json_len;
    assert_eq!(&glb[bin_header + 4..bin_header + 8], b"BIN\0");
    let bin_len = u32::from_le_bytes(glb[bin_header..bin_header + 4].try_into().unwrap()) as usize;
    assert_eq!(bin_len as u64, output.document.root.buffers[0].byte_length.0);

    let json: serde_json::Value = serde_json::from_slice(&glb[20..bin_header]).unwrap();
    assert_eq!(json["asset"]["version"], "2.0");
    assert_eq!(json["skins"][0]["joints"].as_array().map(Vec::len), Some(4));
}

#[test]
fn glb_file_round_trip() -> anyhow::Result<()> {
    let output = build_scene(&portal(), no_response(), &SceneSettings::default())?;
    let path = std::env::temp_dir().join(format!("elastica-scene-{}.glb", std::process::id()));

    output.document.write_glb(&path)?;
    let back = GltfDocument::from_glb(&std::fs::read(&path)?)?;
    std::fs::remove_file(&path)?;

    assert_eq!(back.to_json()?, output.document.to_json()?);
    assert_eq!(back.bin, output.document.bin);
    Ok(())
}
