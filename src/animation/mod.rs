mod values;
pub mod binding;
pub mod clip;
pub mod encoder;
pub mod tracks;

pub use binding::{ChannelTarget, TargetPath};
pub use clip::{AnimationClip, Channel, Sampler};
pub use encoder::{AnimationEncoder, DEFAULT_ANIMATION_NAME, DEFAULT_TIME_STEP};
pub use tracks::KeyframeTrack;
pub use values::Interpolatable;
