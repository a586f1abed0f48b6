use mudra::{
    cursor::CursorDriver,
    gesture::{self, Gesture},
    gui,
    hand::{
        detection::{DetectorConfig, HandDetector},
        landmark::LandmarkIdx,
        tracking::HandTracker,
    },
    timer::FpsCounter,
    webcam::Webcam,
};
use opencv::{
    core::{self, Mat, Point, Scalar},
    imgproc,
};

const WINDOW_TITLE: &str = "mudra";

fn main() -> Result<(), mudra::Error> {
    mudra::init_logger!();

    let mut detector = HandDetector::spawn(&DetectorConfig::default())?;
    let mut tracker = HandTracker::new();
    let mut cursor = CursorDriver::open()?;
    let mut webcam = Webcam::open()?;

    let mut fps = FpsCounter::new("frame loop");
    let mut mirrored = Mat::default();
    loop {
        let Some(frame) = webcam.read()? else {
            log::warn!("ignoring empty camera frame");
            continue;
        };

        // Mirror the image so the cursor follows the hand instead of opposing it.
        core::flip(frame, &mut mirrored, 1)?;

        let result = detector.detect(&mirrored)?;
        tracker.update(&result);

        let gesture = gesture::classify(tracker.hand().map(|hand| hand.landmarks()));
        cursor.apply(gesture)?;

        if let Some(hand) = tracker.hand() {
            let tip = hand.landmarks()[LandmarkIdx::IndexFingerTip];
            cursor.move_to(tip.x(), tip.y())?;
            hand.draw(&mut mirrored)?;
        }
        if gesture != Gesture::Palm {
            imgproc::put_text(
                &mut mirrored,
                &format!("{gesture:?}"),
                Point::new(10, 30),
                imgproc::FONT_HERSHEY_SIMPLEX,
                0.8,
                Scalar::new(0.0, 255.0, 255.0, 0.0),
                2,
                imgproc::LINE_AA,
                false,
            )?;
        }

        gui::show_image(WINDOW_TITLE, &mirrored)?;
        if gui::poll_key(5)? == Some(gui::KEY_ESC) {
            break;
        }

        fps.tick_with(detector.timers());
    }

    gui::close_all()?;
    Ok(())
}
