//! Webcam access.

use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};

/// A webcam yielding a stream of BGR frames.
pub struct Webcam {
    capture: VideoCapture,
    frame: Mat,
}

impl Webcam {
    /// Opens the default capture device.
    ///
    /// This function can block for a significant amount of time while the webcam initializes (on
    /// the order of hundreds of milliseconds).
    pub fn open() -> Result<Self, crate::Error> {
        let capture = VideoCapture::new(0, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err("no webcam device found".into());
        }

        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)?;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)?;
        log::info!("opened webcam, {}x{}", width as u32, height as u32);

        Ok(Self {
            capture,
            frame: Mat::default(),
        })
    }

    /// Reads the next frame from the camera, blocking until one is available.
    ///
    /// Returns `None` when the camera hands back an empty frame. That happens transiently on some
    /// devices; callers should skip the frame and read again. Hard device errors are returned as
    /// `Err` instead.
    pub fn read(&mut self) -> Result<Option<&Mat>, crate::Error> {
        if !self.capture.read(&mut self.frame)? || self.frame.empty() {
            return Ok(None);
        }
        Ok(Some(&self.frame))
    }
}

// The capture device is released when `VideoCapture` drops.
