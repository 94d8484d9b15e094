use glam::{Quat, Vec3};

use crate::animation::binding::{ChannelTarget, TargetPath};
use crate::animation::tracks::KeyframeTrack;
use crate::scene::Skin;

#[derive(Debug, Clone, PartialEq)]
pub enum Sampler {
    Translation(KeyframeTrack<Vec3>),
    Rotation(KeyframeTrack<Quat>),
}

impl Sampler {
    #[must_use]
    pub fn times(&self) -> &[f32] {
        match self {
            Self::Translation(track) => &track.times,
            Self::Rotation(track) => &track.times,
        }
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        match self {
            Self::Translation(track) => track.duration(),
            Self::Rotation(track) => track.duration(),
        }
    }

    #[must_use]
    pub fn path(&self) -> TargetPath {
        match self {
            Self::Translation(_) => TargetPath::Translation,
            Self::Rotation(_) => TargetPath::Rotation,
        }
    }
}

/// Binds sampler `sampler` of the clip to a joint property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub sampler: usize,
    pub target: ChannelTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub samplers: Vec<Sampler>,
    pub channels: Vec<Channel>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: String, samplers: Vec<Sampler>, channels: Vec<Channel>) -> Self {
        let duration = samplers.iter().map(Sampler::duration).fold(0.0_f32, f32::max);

        Self {
            name,
            duration,
            samplers,
            channels,
        }
    }

    /// Number of keyframes over all samplers.
    #[must_use]
    pub fn keyframe_count(&self) -> usize {
        self.samplers.iter().map(|s| s.times().len()).sum()
    }

    /// Poses the joints of `skin` at `time`.
    ///
    /// Joints without a channel keep their current pose; channels pointing
    /// past the end of the skin are ignored.
    pub fn apply_at(&self, skin: &mut Skin, time: f32) {
        for channel in &self.channels {
            let Some(joint) = skin.joints.get_mut(usize::from(channel.target.joint)) else {
                continue;
            };
            match self.samplers.get(channel.sampler) {
                Some(Sampler::Translation(track)) => {
                    if let Some(position) = track.sample(time) {
                        joint.pose.position = position;
                    }
                }
                Some(Sampler::Rotation(track)) => {
                    if let Some(rotation) = track.sample(time) {
                        joint.pose.rotation = rotation;
                    }
                }
                None => {}
            }
        }
    }
}
