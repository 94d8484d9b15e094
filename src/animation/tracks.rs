use crate::animation::values::Interpolatable;

/// Linearly interpolated keyframes (slerp for rotations).
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        Self { times, values }
    }

    /// Track from `(time, value)` samples, sorted ascending in time.
    ///
    /// The sort is stable: samples sharing a timestamp keep their input order.
    #[must_use]
    pub fn from_samples(mut samples: Vec<(f32, T)>) -> Self {
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (times, values) = samples.into_iter().unzip();
        Self::new(times, values)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe, zero for an empty track.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Value at `time`, clamped to the first and last keyframe.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }

        // First index whose time is strictly after `time`.
        let next_idx = self.times.partition_point(|&t| t <= time);
        Some(self.sample_at_frame(next_idx.saturating_sub(1), time))
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        if time <= self.times[0] {
            return self.values[0];
        }
        if index >= len - 1 {
            return self.values[len - 1];
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        T::interpolate_linear(self.values[index], self.values[next_idx], t)
    }

    /// Values flattened into scalar components.
    #[must_use]
    pub fn flat_values(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.values.len() * T::COMPONENTS);
        for value in &self.values {
            value.push_components(&mut out);
        }
        out
    }
}
