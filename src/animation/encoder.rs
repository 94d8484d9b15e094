//! Keyframe accumulation across a sequence of response states.
//!
//! The encoder moves through three states:
//!
//! - idle: nothing recorded yet
//! - accumulating: at least one `record`/`add_skin_state` call
//! - finalized: `finalize` produced a clip; every further mutation fails
//!
//! Tracks are append-only and may be recorded out of order. `finalize` sorts
//! each track by time (ties keep insertion order) and emits one linear sampler
//! per non-empty track, with one channel binding it to its joint property.
//! Tracks are never resampled or merged across joints.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use log::debug;

use crate::animation::binding::ChannelTarget;
use crate::animation::clip::{AnimationClip, Channel, Sampler};
use crate::animation::tracks::KeyframeTrack;
use crate::errors::{ElasticaError, Result};
use crate::model::ResponseState;
use crate::scene::{JointIndex, JointMap, for_each_deformed_joint};

pub const DEFAULT_TIME_STEP: f32 = 0.1;
pub const DEFAULT_ANIMATION_NAME: &str = "BeamDeformations";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncoderState {
    Idle,
    Accumulating,
    Finalized,
}

#[derive(Debug, Clone, Default)]
struct JointTracks {
    translations: Vec<(f32, Vec3)>,
    rotations: Vec<(f32, Quat)>,
}

#[derive(Debug, Clone)]
pub struct AnimationEncoder {
    name: String,
    time_step: f32,
    /// Clock steps taken; the clock is `steps * time_step`.
    steps: u32,
    tracks: BTreeMap<JointIndex, JointTracks>,
    state: EncoderState,
}

impl Default for AnimationEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_NAME, DEFAULT_TIME_STEP)
    }
}

impl AnimationEncoder {
    #[must_use]
    pub fn new(name: impl Into<String>, time_step: f32) -> Self {
        Self {
            name: name.into(),
            time_step,
            steps: 0,
            tracks: BTreeMap::new(),
            state: EncoderState::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.steps as f32 * self.time_step
    }

    #[inline]
    #[must_use]
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    #[inline]
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.state == EncoderState::Finalized
    }

    /// Keyframes recorded so far, over all joints and properties.
    #[must_use]
    pub fn keyframe_count(&self) -> usize {
        self.tracks
            .values()
            .map(|t| t.translations.len() + t.rotations.len())
            .sum()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_finalized() {
            return Err(ElasticaError::AnimationFinalized);
        }
        Ok(())
    }

    /// Moves the clock forward by one step.
    pub fn advance(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.steps += 1;
        Ok(())
    }

    /// Appends a keyframe to `joint`'s translation and/or rotation track.
    pub fn record(&mut self, joint: JointIndex, time: f32, translation: Option<Vec3>, rotation: Option<Quat>) -> Result<()> {
        self.ensure_open()?;
        self.state = EncoderState::Accumulating;

        if translation.is_none() && rotation.is_none() {
            return Ok(());
        }
        let tracks = self.tracks.entry(joint).or_default();
        if let Some(translation) = translation {
            tracks.translations.push((time, translation));
        }
        if let Some(rotation) = rotation {
            tracks.rotations.push((time, rotation));
        }
        Ok(())
    }

    /// Records the deformed pose of every joint present in both `map` and
    /// `state` at `time`. Returns the number of joints recorded.
    pub fn add_skin_state_at<S: ResponseState + ?Sized>(&mut self, state: &S, map: &JointMap, time: f32) -> Result<usize> {
        self.ensure_open()?;
        self.state = EncoderState::Accumulating;

        let mut recorded = 0;
        for_each_deformed_joint(state, map, |joint, pose| {
            let tracks = self.tracks.entry(joint).or_default();
            tracks.translations.push((time, pose.position));
            tracks.rotations.push((time, pose.rotation));
            recorded += 1;
        });
        Ok(recorded)
    }

    /// Records `state` at the current clock, then advances the clock.
    pub fn add_skin_state<S: ResponseState + ?Sized>(&mut self, state: &S, map: &JointMap) -> Result<usize> {
        let recorded = self.add_skin_state_at(state, map, self.current_time())?;
        self.advance()?;
        Ok(recorded)
    }

    /// Bakes the recorded tracks into a clip.
    ///
    /// Returns `Ok(None)` and stays idle when nothing was recorded. A second
    /// call after a clip was produced fails.
    pub fn finalize(&mut self) -> Result<Option<AnimationClip>> {
        self.ensure_open()?;
        if self.state == EncoderState::Idle {
            return Ok(None);
        }
        self.state = EncoderState::Finalized;

        let mut samplers = Vec::new();
        let mut channels = Vec::new();
        for (&joint, tracks) in &mut self.tracks {
            let mut bind = |sampler: Sampler| {
                channels.push(Channel {
                    sampler: samplers.len(),
                    target: ChannelTarget {
                        joint,
                        path: sampler.path(),
                    },
                });
                samplers.push(sampler);
            };

            if !tracks.translations.is_empty() {
                let samples = std::mem::take(&mut tracks.translations);
                bind(Sampler::Translation(KeyframeTrack::from_samples(samples)));
            }
            if !tracks.rotations.is_empty() {
                let samples = std::mem::take(&mut tracks.rotations);
                bind(Sampler::Rotation(KeyframeTrack::from_samples(samples)));
            }
        }
        self.tracks.clear();

        let clip = AnimationClip::new(self.name.clone(), samplers, channels);
        debug!(
            "Finalized animation '{}': {} channels, {} keyframes, {:.3}s",
            clip.name,
            clip.channels.len(),
            clip.keyframe_count(),
            clip.duration
        );
        Ok(Some(clip))
    }
}
