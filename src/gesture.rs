//! Gesture classification from landmark geometry.

use nalgebra::distance;

use crate::hand::landmark::{LandmarkIdx, Landmarks};

/// Maximum normalized thumb-to-index distance that still counts as a pinch.
pub const PINCH_MAX_DIST: f32 = 0.03;

/// Index fingertips above this normalized Y coordinate (near the top of the frame) trigger a
/// scroll.
pub const SCROLL_MAX_Y: f32 = 0.2;

/// A discrete gesture, classified from a single frame's landmarks.
///
/// `Fist` and `TwoFingerClosed` are declared but currently never produced by [`classify`]; no
/// geometry is defined for them yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gesture {
    /// The idle state: an open hand, or no hand at all.
    #[default]
    Palm,
    Fist,
    TwoFingerClosed,
    /// Thumb and index fingertips touching.
    Pinch,
    /// Index fingertip raised to the top of the frame.
    ScrollUp,
}

/// Classifies the gesture formed by `hand`.
///
/// With no hand present the result is [`Gesture::Palm`]. The pinch check runs before the scroll
/// check, so a pinched hand raised to the top of the frame classifies as [`Gesture::Pinch`].
///
/// Thresholds are fixed values tuned against typical webcam footage; there is no calibration
/// step. Each frame is classified from scratch, so gestures do not persist across frames.
pub fn classify(hand: Option<&Landmarks>) -> Gesture {
    let Some(hand) = hand else {
        return Gesture::Palm;
    };

    let index_tip = hand[LandmarkIdx::IndexFingerTip];
    let thumb_tip = hand[LandmarkIdx::ThumbTip];

    if distance(&index_tip.position(), &thumb_tip.position()) < PINCH_MAX_DIST {
        return Gesture::Pinch;
    }

    if index_tip.y() < SCROLL_MAX_Y {
        return Gesture::ScrollUp;
    }

    Gesture::Palm
}
