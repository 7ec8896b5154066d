/// Point in board units.
pub type Point = nalgebra::Point2<f64>;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    nalgebra::distance(a, b)
}

/// Bearing of the segment from `from` to `to` in degrees.
///
/// The angle is measured from the positive x axis and lies in the range
/// (-180, 180]. A zero length segment has a bearing of zero.
pub fn bearing(from: &Point, to: &Point) -> f64 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x).to_degrees();

    if angle <= -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Point halfway between `a` and `b`.
#[inline]
pub fn midpoint(a: &Point, b: &Point) -> Point {
    nalgebra::center(a, b)
}
