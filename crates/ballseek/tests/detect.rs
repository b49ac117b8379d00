//! End-to-end detection on synthetic frames.

use ballseek::{BallDetector, DetectorParams, FrameError, FrameView};
use image::{GrayImage, Luma};

const BALL: u8 = 200;
const BACKGROUND: u8 = 20;

fn scene_with_disk(w: u32, h: u32, cx: i32, cy: i32, r: i32) -> GrayImage {
    GrayImage::from_fn(w, h, |x, y| {
        let (dx, dy) = (x as i32 - cx, y as i32 - cy);
        if dx * dx + dy * dy <= r * r {
            Luma([BALL])
        } else {
            Luma([BACKGROUND])
        }
    })
}

fn scene_with_ellipse(w: u32, h: u32, cx: i32, cy: i32, a: i32, b: i32) -> GrayImage {
    GrayImage::from_fn(w, h, |x, y| {
        let (dx, dy) = ((x as i32 - cx) as f64, (y as i32 - cy) as f64);
        if (dx / a as f64).powi(2) + (dy / b as f64).powi(2) <= 1.0 {
            Luma([BALL])
        } else {
            Luma([BACKGROUND])
        }
    })
}

#[test]
fn detects_a_clean_bright_ball() {
    let gray = scene_with_disk(320, 240, 160, 120, 40);
    let detector = BallDetector::default();

    let detection = detector
        .detect_gray(&gray)
        .expect("a clean bright disk must be detected");
    assert!((detection.x - 160).abs() <= 5, "x off: {detection:?}");
    assert!((detection.y - 120).abs() <= 5, "y off: {detection:?}");
    assert!((detection.radius - 40).abs() <= 6, "radius off: {detection:?}");
    assert!(detection.score > 40.0, "score too low: {detection:?}");
}

#[test]
fn rejects_an_elongated_blob() {
    let gray = scene_with_ellipse(200, 150, 100, 75, 60, 18);
    assert_eq!(BallDetector::default().detect_gray(&gray), None);
}

#[test]
fn all_black_frame_yields_no_detection() {
    let gray = GrayImage::from_pixel(320, 240, Luma([0u8]));
    assert_eq!(BallDetector::default().detect_gray(&gray), None);
}

#[test]
fn detection_is_idempotent() {
    let gray = scene_with_disk(320, 240, 160, 120, 40);
    let detector = BallDetector::default();
    assert_eq!(detector.detect_gray(&gray), detector.detect_gray(&gray));
}

#[test]
fn raw_single_channel_buffer_round_trips() {
    let gray = scene_with_disk(320, 240, 160, 120, 40);
    let frame = FrameView::gray(320, 240, gray.as_raw());
    let from_raw = BallDetector::default().detect(&frame).unwrap();
    let from_gray = BallDetector::default().detect_gray(&gray);
    assert_eq!(from_raw, from_gray);
}

#[test]
fn mis_shaped_buffers_fail_with_invalid_format() {
    let data = vec![0u8; 64 * 48 * 2];
    let frame = FrameView::with_channels(64, 48, 2, &data);
    assert_eq!(
        ballseek::detect(&frame),
        Err(FrameError::InvalidFormat { channels: 2 })
    );

    let data = vec![0u8; 64 * 48 * 4];
    let frame = FrameView::with_channels(64, 48, 4, &data);
    assert_eq!(
        ballseek::detect(&frame),
        Err(FrameError::InvalidFormat { channels: 4 })
    );
}

#[test]
fn rgb_buffers_are_accepted() {
    // The same disk encoded as gray RGB triplets must behave identically.
    let gray = scene_with_disk(320, 240, 160, 120, 40);
    let rgb: Vec<u8> = gray.as_raw().iter().flat_map(|&v| [v, v, v]).collect();
    let frame = FrameView::rgb(320, 240, &rgb);
    let detection = BallDetector::default()
        .detect(&frame)
        .unwrap()
        .expect("ball must be found in the RGB frame");
    assert!((detection.x - 160).abs() <= 5);
    assert!((detection.y - 120).abs() <= 5);
}

#[test]
fn acceptance_floor_override_suppresses_weak_detections() {
    let params: DetectorParams =
        serde_json::from_str(r#"{"validation": {"min_score": 99.0}}"#).unwrap();
    let gray = scene_with_disk(320, 240, 160, 120, 40);
    // A synthetic disk scores well, but never a perfect 99+.
    assert_eq!(BallDetector::new(params).detect_gray(&gray), None);
}
