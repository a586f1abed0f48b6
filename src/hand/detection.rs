//! The hand landmark model boundary.
//!
//! The actual landmark model is MediaPipe Hands, running in a Python subprocess
//! (`scripts/hand_landmarks.py`). Frames are streamed to it as raw BGR data with a small binary
//! header, and it answers with one line of JSON per frame containing every detected hand. The
//! script converts to RGB before inference, so callers hand over frames exactly as the camera
//! (or the mirroring step) produced them.

use std::{
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    process::{Child, ChildStdin, Command, Stdio},
};

use opencv::core::Mat;
use opencv::prelude::*;
use serde::Deserialize;

use crate::timer::Timer;

use super::landmark::{Handedness, Landmark, LandmarkResult, Landmarks};

/// Configuration forwarded to the landmark model.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Maximum number of hands the model will report per frame.
    pub max_hands: u32,
    /// Minimum confidence for a hand to be detected at all.
    pub min_detection_confidence: f32,
    /// Minimum confidence for a hand to keep being tracked across frames.
    pub min_tracking_confidence: f32,
    /// Path to the detector script.
    pub script: PathBuf,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_hands: 2,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.3,
            script: PathBuf::from("scripts/hand_landmarks.py"),
        }
    }
}

/// All hands found in a single frame.
///
/// May be empty; that is a perfectly valid result, not an error.
#[derive(Debug, Clone, Default)]
pub struct DetectionResult {
    hands: Vec<LandmarkResult>,
}

impl DetectionResult {
    pub fn new(hands: Vec<LandmarkResult>) -> Self {
        Self { hands }
    }

    pub fn hands(&self) -> &[LandmarkResult] {
        &self.hands
    }
}

/// Computes hand landmarks by delegating to the external landmark model.
pub struct HandDetector {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<std::process::ChildStdout>,
    t_send: Timer,
    t_infer: Timer,
}

impl HandDetector {
    /// Starts the landmark model subprocess and waits for it to signal readiness.
    ///
    /// The Python interpreter defaults to `python3` and can be overridden with the
    /// `MUDRA_PYTHON` environment variable.
    pub fn spawn(config: &DetectorConfig) -> Result<Self, crate::Error> {
        if !config.script.exists() {
            return Err(format!(
                "landmark model script not found at `{}`",
                config.script.display()
            )
            .into());
        }

        let python = std::env::var("MUDRA_PYTHON").unwrap_or_else(|_| "python3".into());
        log::info!("starting landmark model: {} {}", python, config.script.display());

        let mut process = Command::new(python)
            .arg(&config.script)
            .arg("--max-hands")
            .arg(config.max_hands.to_string())
            .arg("--min-detection-confidence")
            .arg(config.min_detection_confidence.to_string())
            .arg("--min-tracking-confidence")
            .arg(config.min_tracking_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = process.stdin.take().ok_or("failed to open detector stdin")?;
        let stdout = process.stdout.take().ok_or("failed to open detector stdout")?;
        let mut stdout = BufReader::new(stdout);

        let mut ready = String::new();
        stdout.read_line(&mut ready)?;
        if ready.trim() != "READY" {
            return Err(format!("landmark model failed to start (got `{}`)", ready.trim()).into());
        }
        log::info!("landmark model ready");

        Ok(Self {
            process,
            stdin,
            stdout,
            t_send: Timer::new("send"),
            t_infer: Timer::new("infer"),
        })
    }

    /// Computes hand landmarks in `frame`.
    ///
    /// Blocks until the model has processed the frame.
    pub fn detect(&mut self, frame: &Mat) -> Result<DetectionResult, crate::Error> {
        let width = frame.cols() as u32;
        let height = frame.rows() as u32;
        let channels = frame.channels() as u32;
        let data = frame.data_bytes()?;

        let guard = self.t_send.start();
        self.stdin.write_all(&width.to_le_bytes())?;
        self.stdin.write_all(&height.to_le_bytes())?;
        self.stdin.write_all(&channels.to_le_bytes())?;
        self.stdin.write_all(data)?;
        self.stdin.flush()?;
        drop(guard);

        let mut line = String::new();
        self.t_infer.time(|| self.stdout.read_line(&mut line))?;

        let raw: RawDetectionResult = serde_json::from_str(&line)
            .map_err(|e| format!("malformed landmark model response: {e}"))?;
        log::trace!("landmark model response: {:?}", raw);

        if let Some(error) = raw.error {
            return Err(format!("landmark model error: {error}").into());
        }

        let mut hands = Vec::with_capacity(raw.hands.len());
        for hand in raw.hands {
            if hand.landmarks.len() != Landmarks::COUNT {
                log::warn!(
                    "expected {} landmarks, got {}; skipping hand",
                    Landmarks::COUNT,
                    hand.landmarks.len()
                );
                continue;
            }

            let mut landmarks = Landmarks::default();
            for (out, lm) in landmarks.positions_mut().iter_mut().zip(&hand.landmarks) {
                *out = Landmark::new(lm.x, lm.y, lm.z);
            }
            let handedness = match &*hand.handedness {
                "Left" => Handedness::Left,
                _ => Handedness::Right,
            };
            hands.push(LandmarkResult::new(landmarks, hand.score, handedness));
        }

        Ok(DetectionResult::new(hands))
    }

    /// Returns profiling timers for frame upload and model inference.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> + '_ {
        [&self.t_send, &self.t_infer].into_iter()
    }
}

impl Drop for HandDetector {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

#[derive(Debug, Deserialize)]
struct RawLandmark {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Deserialize)]
struct RawHand {
    handedness: String,
    score: f32,
    landmarks: Vec<RawLandmark>,
}

#[derive(Debug, Deserialize)]
struct RawDetectionResult {
    hands: Vec<RawHand>,
    #[serde(default)]
    error: Option<String>,
}
