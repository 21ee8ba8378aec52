//! Data filtering, averaging and smoothing.
//!
//! Landmark trackers jitter; running their output through a per-coordinate filter trades a little
//! latency for visibly steadier overlays. Filtering is opt-in (see
//! [`Session::enable_smoothing`][crate::session::Session::enable_smoothing]) and is the only
//! cross-frame state the engine keeps.

mod ema;
mod moving;

pub use ema::Ema;
pub use moving::MovingAvg;

use crate::iter::ZipExact;
use crate::landmark::Landmarks;

/// A filter for values of type `V`.
pub trait Filter<V> {
    /// Adds a new value to the filter, returning the filtered value.
    fn push(&mut self, value: V) -> V;

    /// Resets the accumulated history and state of the filter to be identical to the state just
    /// after construction.
    fn reset(&mut self);
}

impl<V> Filter<V> for Box<dyn Filter<V> + Send> {
    fn push(&mut self, value: V) -> V {
        (**self).push(value)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Batch filter applying an independent per-coordinate filter to every landmark in a frame.
///
/// Apply this to raw tracker output in normalized coordinates, so the filter parameters don't
/// depend on the video resolution.
pub struct LandmarkSmoother<F> {
    states: Vec<[F; 3]>,
}

impl<F: Filter<f32> + Clone> LandmarkSmoother<F> {
    /// Creates a smoother for frames of exactly `num_landmarks` landmarks, with every coordinate
    /// filtered by a clone of `filter`.
    pub fn new(filter: F, num_landmarks: usize) -> Self {
        Self {
            states: std::iter::repeat_with(|| {
                [filter.clone(), filter.clone(), filter.clone()]
            })
            .take(num_landmarks)
            .collect(),
        }
    }

    /// The frame length this smoother was built for.
    pub fn num_landmarks(&self) -> usize {
        self.states.len()
    }

    /// Filters a frame's landmarks in place.
    ///
    /// # Panics
    ///
    /// Panics if `landmarks` does not have exactly as many entries as were specified in the
    /// `num_landmarks` parameter in the call to [`LandmarkSmoother::new`].
    pub fn apply(&mut self, landmarks: &mut Landmarks) {
        for (pos, states) in landmarks.positions_mut().zip_exact(&mut self.states) {
            for (coord, state) in pos.zip_exact(states) {
                *coord = state.push(*coord);
            }
        }
    }

    /// Discards all accumulated history.
    pub fn reset(&mut self) {
        for states in &mut self.states {
            for state in states {
                state.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoother_filters_every_coordinate() {
        let mut smoother = LandmarkSmoother::new(Ema::new(0.5), 2);
        let mut lms = Landmarks::from_positions(vec![[0.0; 3], [1.0, 2.0, 3.0]]);
        smoother.apply(&mut lms);
        assert_eq!(lms.positions()[1], [1.0, 2.0, 3.0]);

        let mut lms = Landmarks::from_positions(vec![[0.0; 3], [2.0, 4.0, 6.0]]);
        smoother.apply(&mut lms);
        assert_eq!(lms.positions()[1], [1.5, 3.0, 4.5]);
    }

    #[test]
    #[should_panic]
    fn smoother_rejects_mismatched_frames() {
        let mut smoother = LandmarkSmoother::new(Ema::new(0.5), 3);
        let mut lms = Landmarks::new(2);
        smoother.apply(&mut lms);
    }

    #[test]
    fn reset_forgets_history() {
        let mut smoother = LandmarkSmoother::new(Ema::new(0.1), 1);
        let mut lms = Landmarks::from_positions(vec![[5.0, 5.0, 5.0]]);
        smoother.apply(&mut lms);
        smoother.reset();

        let mut lms = Landmarks::from_positions(vec![[9.0, 9.0, 9.0]]);
        smoother.apply(&mut lms);
        assert_eq!(lms.positions()[0], [9.0, 9.0, 9.0]);
    }
}
