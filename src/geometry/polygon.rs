//! Convex polygon clipping and area in the horizontal plane.

use crate::util::math::{cross, Point};

/// Clips `subject` against the convex, counter-clockwise polygon `clip`.
///
/// Sutherland-Hodgman: the subject is cut by the half-plane left of each clip
/// edge in turn. Points on an edge count as inside, so touching polygons
/// produce a degenerate (zero-area) result rather than an empty one.
pub(crate) fn clip_convex(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    let mut output = subject.to_vec();
    let edges = clip.len();
    for i in 0..edges {
        if output.is_empty() {
            break;
        }
        let a = clip[i];
        let b = clip[(i + 1) % edges];
        let input = std::mem::take(&mut output);
        let n = input.len();
        for j in 0..n {
            let cur = input[j];
            let prev = input[(j + n - 1) % n];
            let cur_in = cross(a, b, cur) >= 0.0;
            let prev_in = cross(a, b, prev) >= 0.0;
            if cur_in {
                if !prev_in {
                    output.push(edge_crossing(prev, cur, a, b));
                }
                output.push(cur);
            } else if prev_in {
                output.push(edge_crossing(prev, cur, a, b));
            }
        }
    }
    output
}

/// Point where segment `p -> q` crosses the line through `a -> b`.
fn edge_crossing(p: Point, q: Point, a: Point, b: Point) -> Point {
    let dp = cross(a, b, p);
    let dq = cross(a, b, q);
    let denom = dp - dq;
    if denom == 0.0 {
        return q;
    }
    let t = dp / denom;
    [p[0] + t * (q[0] - p[0]), p[1] + t * (q[1] - p[1])]
}

/// Unsigned shoelace area.
pub(crate) fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice += p[0] * q[1] - q[0] * p[1];
    }
    twice.abs() / 2.0
}
