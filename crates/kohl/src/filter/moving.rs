//! Moving window average.

use std::collections::VecDeque;

use super::Filter;

/// A simple moving average over a fixed-size window of recent values.
#[derive(Debug, Clone)]
pub struct MovingAvg {
    window: usize,
    values: VecDeque<f32>,
}

impl MovingAvg {
    /// Creates a moving average filter over the last `window` values.
    ///
    /// # Panics
    ///
    /// This method will panic if `window` is zero.
    pub fn new(window: usize) -> Self {
        assert!(window != 0, "moving average window must be non-empty");
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }
}

impl Filter<f32> for MovingAvg {
    fn push(&mut self, value: f32) -> f32 {
        if self.values.len() == self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }

    fn reset(&mut self) {
        self.values.clear();
    }
}
