use crate::Point2D;

/// MediaPipe hand landmark indices for the two fingertips whose distance
/// drives the control signal.
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_TIP: usize = 8;

/// One frame of hand landmarks from the upstream detector agent, in pixel
/// coordinates. An empty frame means no hand was detected.
pub type LandmarkFrame = Vec<Point2D>;

/// Pick the (thumb tip, index tip) pair out of a landmark frame.
///
/// Returns None when the frame is empty or too short to contain both
/// fingertips; the caller treats that as a no-signal tick.
pub fn fingertip_pair(frame: &[Point2D]) -> Option<(Point2D, Point2D)> {
    if frame.len() <= INDEX_FINGER_TIP.max(THUMB_TIP) {
        return None;
    }
    Some((frame[THUMB_TIP], frame[INDEX_FINGER_TIP]))
}
