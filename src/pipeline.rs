//! End-to-end scene build.
//!
//! model -> extrusion -> skin -> (deformation | animation) -> document

use log::{debug, info};

use crate::animation::{AnimationClip, AnimationEncoder};
use crate::errors::Result;
use crate::model::{FrameModel, ResponseInput, ResponseState};
use crate::resources::CrossSectionExtruder;
use crate::scene::{DeformationApplier, JointMap, Skin};
use crate::settings::SceneSettings;
use crate::writer::{GltfDocument, SceneBuilder, write_animation, write_line_strip, write_skinned_mesh};

/// Everything produced by [`build_scene`].
#[derive(Debug, Clone)]
pub struct SceneOutput {
    pub document: GltfDocument,
    pub joint_map: JointMap,
    /// The skin as written; deformed for a single state, in bind pose otherwise.
    pub skin: Skin,
    /// The baked animation for a named state sequence.
    pub clip: Option<AnimationClip>,
}

/// Builds the scene for `model` and an optional response.
///
/// - no response: the reference configuration
/// - `Single`: joints written in the deformed pose, plus deformed centerlines
///   when `settings.centerline_samples > 0`
/// - `Named`: states recorded in sequence order, one clock step apart, and
///   baked into an animation
pub fn build_scene<M, S>(model: &M, input: Option<&ResponseInput<S>>, settings: &SceneSettings) -> Result<SceneOutput>
where
    M: FrameModel + ?Sized,
    S: ResponseState,
{
    let extrusion = CrossSectionExtruder::new(settings.outline_scale).extrude(model)?;
    debug!("Building scene for {} response state(s)", input.map_or(0, ResponseInput::len));
    if let Some(bounds) = extrusion.mesh.bounding_box() {
        info!("Reference mesh centered at {} with extent {}", bounds.center(), bounds.size());
    }
    let mut skin = extrusion.bind_skin(&settings.skin_name);
    let mut builder = SceneBuilder::new();
    let mut clip = None;

    match input {
        None => {
            write_skinned_mesh(&mut builder, &extrusion.mesh, &skin, settings);
        }
        Some(ResponseInput::Single(state)) => {
            let moved = DeformationApplier.apply(&mut skin, state, &extrusion.joint_map);
            match skin.pose_bounds() {
                Some(bounds) => info!("Posed {moved} of {} joints, extent {}", skin.len(), bounds.size()),
                None => info!("Posed {moved} of {} joints", skin.len()),
            }
            write_skinned_mesh(&mut builder, &extrusion.mesh, &skin, settings);

            if settings.centerline_samples > 0 {
                for element in model.elements() {
                    if let Some(curve) = element.deformed_centerline(state, settings.centerline_samples)? {
                        write_line_strip(&mut builder, &curve.points, &format!("{}Centerline", element.name));
                    }
                }
            }
        }
        Some(ResponseInput::Named(states)) => {
            let mut encoder = AnimationEncoder::new(settings.animation_name.clone(), settings.time_step);
            for (name, state) in states {
                let recorded = encoder.add_skin_state(state, &extrusion.joint_map)?;
                debug!("State '{name}': {recorded} joints recorded");
            }
            clip = encoder.finalize()?;

            let handle = write_skinned_mesh(&mut builder, &extrusion.mesh, &skin, settings);
            if let Some(clip) = clip.as_ref().filter(|c| !c.channels.is_empty() && !handle.is_empty()) {
                write_animation(&mut builder, clip, &handle);
            }
        }
    }

    let document = builder.finish();
    info!(
        "Scene: {} nodes, {} meshes, {} animations, {} bytes of buffer data",
        document.root.nodes.len(),
        document.root.meshes.len(),
        document.root.animations.len(),
        document.bin.len()
    );

    Ok(SceneOutput {
        document,
        joint_map: extrusion.joint_map,
        skin,
        clip,
    })
}
