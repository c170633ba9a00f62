use crate::Point2D;

/// Euclidean distance between two pixel-space points.
///
/// Distances are raw pixels; nothing here corrects for camera resolution
/// or subject distance.
pub fn distance(a: &Point2D, b: &Point2D) -> f32 {
    let (x1, y1) = *a;
    let (x2, y2) = *b;

    (x2 - x1).hypot(y2 - y1)
}
