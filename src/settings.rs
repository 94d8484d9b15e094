//! Scene Build Settings
//!
//! [`SceneSettings`] collects the knobs of a scene build: outline scaling,
//! animation timing, and the names given to the emitted glTF objects.
//!
//! # Quick Start
//!
//! ```rust
//! use elastica::SceneSettings;
//!
//! // Defaults: unit outline scale, 0.1 s between response states
//! let settings = SceneSettings::default();
//! assert_eq!(settings.time_step, 0.1);
//!
//! // Override a few fields
//! let settings = SceneSettings {
//!     outline_scale: 50.0,
//!     centerline_samples: 21,
//!     ..Default::default()
//! };
//!
//! // Or load them from JSON; missing fields take their defaults
//! let settings = SceneSettings::from_json_str(r#"{ "time_step": 0.5 }"#).unwrap();
//! assert_eq!(settings.animation_name, "BeamDeformations");
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::{DEFAULT_ANIMATION_NAME, DEFAULT_TIME_STEP};
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Scale applied to the in-plane coordinates of every outline point.
    pub outline_scale: f32,

    /// Seconds between consecutive response states.
    pub time_step: f32,

    pub animation_name: String,
    pub mesh_name: String,
    pub skin_name: String,

    /// Points per deformed centerline. Zero disables centerlines.
    ///
    /// Only used for a single (static) response state.
    pub centerline_samples: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            outline_scale: 1.0,
            time_step: DEFAULT_TIME_STEP,
            animation_name: DEFAULT_ANIMATION_NAME.to_string(),
            mesh_name: "FrameExtrusionMesh".to_string(),
            skin_name: "FrameExtrusionSkin".to_string(),
            centerline_samples: 0,
        }
    }
}

impl SceneSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
