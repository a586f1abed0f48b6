//! Latest-hand tracking.

use super::detection::DetectionResult;
use super::landmark::LandmarkResult;

/// Remembers the most recently detected hand.
///
/// Only a single hand is tracked: the first one in each detection result. A frame without any
/// hands clears the tracker; "no hand" is a valid state, not an error.
#[derive(Debug, Default)]
pub struct HandTracker {
    hand: Option<LandmarkResult>,
}

impl HandTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tracked hand with the first hand in `result`, or clears it if the result is
    /// empty.
    pub fn update(&mut self, result: &DetectionResult) {
        self.hand = result.hands().first().cloned();
    }

    /// Returns the hand observed in the most recent frame, if any.
    pub fn hand(&self) -> Option<&LandmarkResult> {
        self.hand.as_ref()
    }
}
