//! Runs detection results through the tracker, classifier and cursor driver the same way the
//! frame loop does, and checks which input events come out.

use mudra::{
    cursor::{CursorDriver, Pointer, SCROLL_STEP},
    gesture::{self, Gesture},
    hand::{
        detection::DetectionResult,
        landmark::{Handedness, Landmark, LandmarkIdx, LandmarkResult, Landmarks},
        tracking::HandTracker,
    },
};

#[derive(Default)]
struct RecordingPointer {
    moves: Vec<(i32, i32)>,
    clicks: u32,
    scrolls: Vec<i32>,
}

impl Pointer for RecordingPointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), mudra::Error> {
        self.moves.push((x, y));
        Ok(())
    }

    fn double_click(&mut self) -> Result<(), mudra::Error> {
        self.clicks += 1;
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> Result<(), mudra::Error> {
        self.scrolls.push(amount);
        Ok(())
    }
}

fn hand_with(index_tip: (f32, f32), thumb_tip: (f32, f32)) -> DetectionResult {
    let mut landmarks = Landmarks::default();
    landmarks[LandmarkIdx::IndexFingerTip] = Landmark::new(index_tip.0, index_tip.1, 0.0);
    landmarks[LandmarkIdx::ThumbTip] = Landmark::new(thumb_tip.0, thumb_tip.1, 0.0);
    DetectionResult::new(vec![LandmarkResult::new(landmarks, 0.9, Handedness::Right)])
}

/// One frame loop iteration, minus camera and display.
fn run_frame(
    tracker: &mut HandTracker,
    cursor: &mut CursorDriver<RecordingPointer>,
    result: &DetectionResult,
) -> Gesture {
    tracker.update(result);
    let gesture = gesture::classify(tracker.hand().map(|hand| hand.landmarks()));
    cursor.apply(gesture).unwrap();
    if let Some(hand) = tracker.hand() {
        let tip = hand.landmarks()[LandmarkIdx::IndexFingerTip];
        cursor.move_to(tip.x(), tip.y()).unwrap();
    }
    gesture
}

#[test]
fn pinch_frame_clicks_and_moves() {
    let mut tracker = HandTracker::new();
    let mut cursor = CursorDriver::with_pointer(RecordingPointer::default(), 1920, 1080);

    let gesture = run_frame(
        &mut tracker,
        &mut cursor,
        &hand_with((0.5, 0.5), (0.5, 0.502)),
    );

    assert_eq!(gesture, Gesture::Pinch);
    assert_eq!(cursor.pointer().clicks, 1);
    assert!(cursor.pointer().scrolls.is_empty());
    assert_eq!(cursor.pointer().moves, vec![(960, 540)]);
}

#[test]
fn raised_finger_frame_scrolls() {
    let mut tracker = HandTracker::new();
    let mut cursor = CursorDriver::with_pointer(RecordingPointer::default(), 1920, 1080);

    let gesture = run_frame(
        &mut tracker,
        &mut cursor,
        &hand_with((0.5, 0.1), (0.9, 0.9)),
    );

    assert_eq!(gesture, Gesture::ScrollUp);
    assert_eq!(cursor.pointer().scrolls, vec![SCROLL_STEP]);
    assert_eq!(cursor.pointer().clicks, 0);
}

#[test]
fn open_hand_frame_only_moves() {
    let mut tracker = HandTracker::new();
    let mut cursor = CursorDriver::with_pointer(RecordingPointer::default(), 1920, 1080);

    let gesture = run_frame(
        &mut tracker,
        &mut cursor,
        &hand_with((0.5, 0.5), (0.1, 0.1)),
    );

    assert_eq!(gesture, Gesture::Palm);
    assert_eq!(cursor.pointer().clicks, 0);
    assert!(cursor.pointer().scrolls.is_empty());
    assert_eq!(cursor.pointer().moves.len(), 1);
}

#[test]
fn empty_frame_leaves_cursor_alone() {
    let mut tracker = HandTracker::new();
    let mut cursor = CursorDriver::with_pointer(RecordingPointer::default(), 1920, 1080);

    run_frame(&mut tracker, &mut cursor, &hand_with((0.5, 0.5), (0.1, 0.1)));
    let moves_before = cursor.pointer().moves.len();

    let gesture = run_frame(&mut tracker, &mut cursor, &DetectionResult::default());

    assert_eq!(gesture, Gesture::Palm);
    assert_eq!(cursor.pointer().moves.len(), moves_before);
    assert_eq!(cursor.pointer().clicks, 0);
}

#[test]
fn cursor_smooths_across_frames() {
    let mut tracker = HandTracker::new();
    let mut cursor = CursorDriver::with_pointer(RecordingPointer::default(), 1000, 1000);

    run_frame(&mut tracker, &mut cursor, &hand_with((0.0, 0.0), (0.9, 0.9)));
    run_frame(&mut tracker, &mut cursor, &hand_with((1.0, 1.0), (0.1, 0.1)));

    // The second frame only closes 20% of the way to the new target.
    assert_eq!(cursor.pointer().moves, vec![(0, 0), (200, 200)]);
}
