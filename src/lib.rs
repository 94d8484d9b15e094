#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod errors;
pub mod geometry;
pub mod model;
pub mod pipeline;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod writer;

pub use animation::{AnimationClip, AnimationEncoder, KeyframeTrack, TargetPath};
pub use errors::{ElasticaError, Result};
pub use geometry::{CurveSamples, ElasticCurve, EndDisplacements};
pub use model::{
    BasicState, CrossSectionOutline, ElementResponse, FrameElement, FrameModel, Model, ResponseInput, ResponseState,
    Station,
};
pub use pipeline::{SceneOutput, build_scene};
pub use resources::{CrossSectionExtruder, Extrusion, SkinnedMesh};
pub use scene::{DeformationApplier, JointMap, Skin};
pub use settings::SceneSettings;
pub use writer::{GltfDocument, SceneBuilder};
