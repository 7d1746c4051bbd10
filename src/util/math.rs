//! Scalar helpers shared by the overlap geometry.

/// 2D point in the bird's-eye-view plane.
pub(crate) type Point = [f64; 2];

/// Z component of `(a - o) x (b - o)`; positive when `b` lies left of `o -> a`.
#[inline]
pub(crate) fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
}

/// Length of the overlap between `[lo_a, hi_a]` and `[lo_b, hi_b]`, never negative.
#[inline]
pub(crate) fn interval_overlap(lo_a: f64, hi_a: f64, lo_b: f64, hi_b: f64) -> f64 {
    (hi_a.min(hi_b) - lo_a.max(lo_b)).max(0.0)
}

/// Rotates the local offset `(dx, dy)` by `(sin, cos)` and translates it to `center`.
#[inline]
pub(crate) fn rotate_offset(center: Point, dx: f64, dy: f64, sin: f64, cos: f64) -> Point {
    [
        center[0] + dx * cos - dy * sin,
        center[1] + dx * sin + dy * cos,
    ]
}
