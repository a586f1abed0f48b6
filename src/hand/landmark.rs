//! Hand landmark data and overlay drawing.

use std::ops::{Index, IndexMut};

use nalgebra::Point2;
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc,
    prelude::*,
};

/// A single hand landmark.
///
/// X and Y are normalized to `[0, 1]` relative to the frame width and height. Z is the depth
/// relative to the wrist and only meaningful for comparisons between landmarks of the same hand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    x: f32,
    y: f32,
    z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.z
    }

    /// Returns the landmark's position in the image plane, ignoring depth.
    pub fn position(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }
}

/// The fixed set of 21 landmarks describing one detected hand in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmarks {
    positions: [Landmark; 21],
}

impl Landmarks {
    pub const COUNT: usize = 21;

    pub fn new(positions: [Landmark; 21]) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[Landmark] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Landmark] {
        &mut self.positions
    }
}

impl Default for Landmarks {
    fn default() -> Self {
        Self {
            positions: [Landmark::default(); 21],
        }
    }
}

impl Index<LandmarkIdx> for Landmarks {
    type Output = Landmark;

    fn index(&self, index: LandmarkIdx) -> &Self::Output {
        &self.positions[index as usize]
    }
}

impl IndexMut<LandmarkIdx> for Landmarks {
    fn index_mut(&mut self, index: LandmarkIdx) -> &mut Self::Output {
        &mut self.positions[index as usize]
    }
}

impl Index<usize> for Landmarks {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Self::Output {
        &self.positions[index]
    }
}

/// One detected hand: its landmarks plus the metadata reported by the landmark model.
#[derive(Debug, Clone)]
pub struct LandmarkResult {
    landmarks: Landmarks,
    confidence: f32,
    handedness: Handedness,
}

impl LandmarkResult {
    pub fn new(landmarks: Landmarks, confidence: f32, handedness: Handedness) -> Self {
        Self {
            landmarks,
            confidence,
            handedness,
        }
    }

    #[inline]
    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    /// Returns the model's confidence that this is a real hand, between 0.0 and 1.0.
    #[inline]
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    #[inline]
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Draws the hand skeleton and metadata onto `target`.
    ///
    /// Landmark coordinates are normalized, so the overlay scales with the target image.
    pub fn draw(&self, target: &mut Mat) -> Result<(), crate::Error> {
        let green = Scalar::new(0.0, 255.0, 0.0, 0.0);
        let red = Scalar::new(0.0, 0.0, 255.0, 0.0);
        let width = target.cols() as f32;
        let height = target.rows() as f32;
        let px = |lm: &Landmark| Point::new((lm.x() * width) as i32, (lm.y() * height) as i32);

        for (a, b) in CONNECTIVITY {
            imgproc::line(
                target,
                px(&self.landmarks[*a]),
                px(&self.landmarks[*b]),
                green,
                1,
                imgproc::LINE_AA,
                0,
            )?;
        }
        for lm in self.landmarks.positions() {
            imgproc::circle(target, px(lm), 3, red, imgproc::FILLED, imgproc::LINE_AA, 0)?;
        }

        let hand = match self.handedness {
            Handedness::Left => "L",
            Handedness::Right => "R",
        };
        let wrist = px(&self.landmarks[LandmarkIdx::Wrist]);
        imgproc::put_text(
            target,
            &format!("{hand} {:.2}", self.confidence),
            Point::new(wrist.x, wrist.y + 20),
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.5,
            green,
            1,
            imgproc::LINE_AA,
            false,
        )?;

        Ok(())
    }
}

/// Which side's hand the landmark model saw.
///
/// This assumes that the camera image is passed to the model as-is. The frame loop mirrors the
/// image *before* detection, so the reported side matches what the user sees on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// Names for the hand pose landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

const CONNECTIVITY: &[(LandmarkIdx, LandmarkIdx)] = {
    use LandmarkIdx::*;
    &[
        // Surround the palm:
        (Wrist, ThumbCmc),
        (ThumbCmc, IndexFingerMcp),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, PinkyMcp),
        (PinkyMcp, Wrist),
        // Thumb:
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index finger:
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle finger:
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring finger:
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};
