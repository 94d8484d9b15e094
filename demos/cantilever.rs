//! Cantilever under a growing tip load.
//!
//! Extrudes a rectangular beam, bakes five load steps into an animation and
//! writes the result as a GLB file in the system temp directory.

use glam::{Mat3, Vec3};

use elastica::{
    BasicState, CrossSectionOutline, ElementResponse, FrameElement, Model, ResponseInput, SceneSettings, build_scene,
};

const STATIONS: usize = 6;
const LENGTH: f32 = 4.0;
const TIP_DEFLECTION: f32 = -0.4;

fn load_step(factor: f32) -> BasicState {
    let mut deltas = Vec::with_capacity(STATIONS);
    let mut rotations = Vec::with_capacity(STATIONS);
    for k in 0..STATIONS {
        let x = k as f32 / (STATIONS - 1) as f32;
        // Tip-loaded cantilever: w(x) = w_tip * x^2 (3 - x) / 2
        let w = factor * TIP_DEFLECTION * x * x * (3.0 - x) / 2.0;
        let slope = factor * TIP_DEFLECTION * 3.0 * x * (2.0 - x) / (2.0 * LENGTH);
        deltas.push(Vec3::new(0.0, 0.0, w));
        rotations.push(Mat3::from_rotation_y(-slope));
    }
    BasicState::new().with_element("cantilever", ElementResponse::new(deltas, rotations))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut model = Model::new();
    model.add_element(FrameElement::straight(
        "cantilever",
        Vec3::ZERO,
        Vec3::new(LENGTH, 0.0, 0.0),
        STATIONS,
        Mat3::IDENTITY,
    ));
    model.set_outline("cantilever", CrossSectionOutline::rectangle(0.2, 0.4));

    let states: Vec<(String, BasicState)> = (0..5)
        .map(|step| (format!("step-{step}"), load_step(step as f32 / 4.0)))
        .collect();

    let settings = SceneSettings {
        time_step: 0.5,
        ..SceneSettings::default()
    };
    let output = build_scene(&model, Some(&ResponseInput::Named(states)), &settings)?;

    let path = std::env::temp_dir().join("cantilever.glb");
    output.document.write_glb(&path)?;
    println!(
        "wrote {} ({} joints, {} keyframes)",
        path.display(),
        output.joint_map.len(),
        output.clip.as_ref().map_or(0, elastica::AnimationClip::keyframe_count)
    );
    Ok(())
}
