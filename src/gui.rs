//! A simple, high-level debug GUI.

use opencv::{core::Mat, highgui};

/// The key code reported for the Escape key.
pub const KEY_ESC: i32 = 27;

/// Displays `image` in a window with the given title, creating the window on first use.
pub fn show_image(title: &str, image: &Mat) -> Result<(), crate::Error> {
    highgui::imshow(title, image)?;
    Ok(())
}

/// Pumps window events for up to `delay_ms` milliseconds and returns the pressed key, if any.
///
/// Must be called regularly for the window to stay responsive.
pub fn poll_key(delay_ms: i32) -> Result<Option<i32>, crate::Error> {
    let key = highgui::wait_key(delay_ms)?;
    Ok((key != -1).then_some(key & 0xff))
}

/// Closes all windows opened by [`show_image`].
pub fn close_all() -> Result<(), crate::Error> {
    highgui::destroy_all_windows()?;
    Ok(())
}
