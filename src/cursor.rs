//! Smoothed cursor movement and input dispatch.

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Mouse, Settings};

use crate::{
    filter::{Ema, Filter},
    gesture::Gesture,
};

/// Weight of the newest position in the cursor smoothing filter.
pub const SMOOTHING_ALPHA: f32 = 0.2;

/// Scroll magnitude dispatched for [`Gesture::ScrollUp`].
pub const SCROLL_STEP: i32 = 18;

/// The OS input boundary.
///
/// [`CursorDriver`] is generic over this so that tests can observe dispatched input events
/// without moving the real cursor. All events are irreversible once issued.
pub trait Pointer {
    /// Moves the cursor to an absolute pixel position.
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), crate::Error>;

    /// Double-clicks at the current cursor position.
    fn double_click(&mut self) -> Result<(), crate::Error>;

    /// Scrolls vertically. Positive `amount` scrolls up, negative scrolls down.
    fn scroll(&mut self, amount: i32) -> Result<(), crate::Error>;
}

/// The real OS pointer.
pub struct SystemPointer {
    enigo: Enigo,
}

impl SystemPointer {
    pub fn new() -> Result<Self, crate::Error> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| format!("failed to connect to the input system: {e}"))?;
        Ok(Self { enigo })
    }

    /// Returns the main display's resolution in pixels.
    pub fn screen_resolution(&self) -> Result<(u32, u32), crate::Error> {
        let (width, height) = self
            .enigo
            .main_display()
            .map_err(|e| format!("failed to query display size: {e}"))?;
        Ok((width as u32, height as u32))
    }
}

impl Pointer for SystemPointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), crate::Error> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| format!("cursor move failed: {e}").into())
    }

    fn double_click(&mut self) -> Result<(), crate::Error> {
        for _ in 0..2 {
            self.enigo
                .button(Button::Left, Direction::Click)
                .map_err(|e| format!("click failed: {e}"))?;
        }
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> Result<(), crate::Error> {
        // enigo counts positive scroll lengths as "down".
        self.enigo
            .scroll(-amount, Axis::Vertical)
            .map_err(|e| format!("scroll failed: {e}").into())
    }
}

/// Converts normalized hand positions into smoothed cursor movement and turns classified
/// gestures into input events.
///
/// The smoothing state lives inside the driver and persists across frames, so per-frame
/// detection jitter is averaged out. There is no unsmoothed mode.
pub struct CursorDriver<P = SystemPointer> {
    pointer: P,
    screen_width: f32,
    screen_height: f32,
    smooth_x: Ema,
    smooth_y: Ema,
}

impl CursorDriver<SystemPointer> {
    /// Creates a driver for the real OS pointer, sized to the main display.
    pub fn open() -> Result<Self, crate::Error> {
        let pointer = SystemPointer::new()?;
        let (width, height) = pointer.screen_resolution()?;
        log::info!("driving cursor on a {width}x{height} display");
        Ok(Self::with_pointer(pointer, width, height))
    }
}

impl<P: Pointer> CursorDriver<P> {
    pub fn with_pointer(pointer: P, screen_width: u32, screen_height: u32) -> Self {
        Self {
            pointer,
            screen_width: screen_width as f32,
            screen_height: screen_height as f32,
            smooth_x: Ema::new(SMOOTHING_ALPHA),
            smooth_y: Ema::new(SMOOTHING_ALPHA),
        }
    }

    /// Moves the cursor towards a normalized `[0, 1]` position.
    ///
    /// The position is scaled to screen pixels and smoothed before the cursor is moved. The very
    /// first move jumps straight to the target (it seeds the filter); later moves close 20% of
    /// the remaining distance per call.
    pub fn move_to(&mut self, norm_x: f32, norm_y: f32) -> Result<(), crate::Error> {
        let x = self.smooth_x.push(norm_x * self.screen_width);
        let y = self.smooth_y.push(norm_y * self.screen_height);
        self.pointer.move_to(x as i32, y as i32)
    }

    /// Double-clicks at the current cursor position.
    pub fn click(&mut self) -> Result<(), crate::Error> {
        self.pointer.double_click()
    }

    /// Scrolls up by the fixed [`SCROLL_STEP`].
    pub fn scroll_up(&mut self) -> Result<(), crate::Error> {
        self.pointer.scroll(SCROLL_STEP)
    }

    /// Dispatches the input event a classified gesture calls for, if any.
    pub fn apply(&mut self, gesture: Gesture) -> Result<(), crate::Error> {
        match gesture {
            Gesture::Pinch => {
                log::debug!("pinch: double click");
                self.click()
            }
            Gesture::ScrollUp => {
                log::debug!("index finger raised: scrolling up");
                self.scroll_up()
            }
            Gesture::Palm | Gesture::Fist | Gesture::TwoFingerClosed => Ok(()),
        }
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// Records dispatched input events instead of performing them.
    #[derive(Default)]
    struct RecordingPointer {
        moves: Vec<(i32, i32)>,
        clicks: u32,
        scrolls: Vec<i32>,
    }

    impl Pointer for RecordingPointer {
        fn move_to(&mut self, x: i32, y: i32) -> Result<(), crate::Error> {
            self.moves.push((x, y));
            Ok(())
        }

        fn double_click(&mut self) -> Result<(), crate::Error> {
            self.clicks += 1;
            Ok(())
        }

        fn scroll(&mut self, amount: i32) -> Result<(), crate::Error> {
            self.scrolls.push(amount);
            Ok(())
        }
    }

    fn driver() -> CursorDriver<RecordingPointer> {
        CursorDriver::with_pointer(RecordingPointer::default(), 1000, 1000)
    }

    #[test]
    fn first_move_seeds_the_filter() {
        let mut driver = driver();
        driver.move_to(0.5, 0.25).unwrap();
        assert_eq!(driver.pointer().moves, vec![(500, 250)]);
    }

    #[test]
    fn repeated_moves_converge_to_target() {
        let mut driver = driver();
        driver.move_to(0.0, 0.0).unwrap();
        for _ in 0..100 {
            driver.move_to(0.5, 0.5).unwrap();
        }

        // Geometric convergence with ratio 0.8 reaches the target long before 100 steps.
        let (x, y) = *driver.pointer().moves.last().unwrap();
        assert_relative_eq!(x as f32, 500.0, max_relative = 0.01);
        assert_relative_eq!(y as f32, 500.0, max_relative = 0.01);

        // The second move must have closed 20% of the distance.
        assert_eq!(driver.pointer().moves[1], (100, 100));
    }

    #[test]
    fn pinch_dispatches_one_double_click() {
        let mut driver = driver();
        driver.apply(Gesture::Pinch).unwrap();
        assert_eq!(driver.pointer().clicks, 1);
        assert!(driver.pointer().scrolls.is_empty());
    }

    #[test]
    fn scroll_up_dispatches_fixed_step() {
        let mut driver = driver();
        driver.apply(Gesture::ScrollUp).unwrap();
        assert_eq!(driver.pointer().scrolls, vec![SCROLL_STEP]);
        assert_eq!(driver.pointer().clicks, 0);
    }

    #[test]
    fn palm_dispatches_nothing() {
        let mut driver = driver();
        driver.apply(Gesture::Palm).unwrap();
        assert_eq!(driver.pointer().clicks, 0);
        assert!(driver.pointer().scrolls.is_empty());
        assert!(driver.pointer().moves.is_empty());
    }
}
