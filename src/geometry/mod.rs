//! Overlap between oriented 3-D boxes.
//!
//! The footprint of each box is a rotated rectangle in the horizontal plane.
//! Footprint intersection comes from convex polygon clipping; the vertical
//! axis contributes a plain interval overlap. Everything runs in `f64` and
//! only the final ratio is narrowed to `f32`.

pub(crate) mod polygon;

use std::cmp::Ordering;

use crate::boxes::Box3d;
use crate::util::math::interval_overlap;
use polygon::{clip_convex, polygon_area};

/// 3-D intersection-over-union of two oriented boxes, in `[0, 1]`.
///
/// Returns 0 when either box has no volume, when the boxes are apart along
/// the vertical axis, or when their footprints do not meet. The result is
/// bitwise symmetric in its arguments.
pub fn iou_3d(a: &Box3d, b: &Box3d) -> f32 {
    let (a, b) = canonical_pair(a, b);
    let vol_a = a.volume();
    let vol_b = b.volume();
    if vol_a <= 0.0 || vol_b <= 0.0 {
        return 0.0;
    }

    let dz = vertical_overlap(a, b);
    if dz <= 0.0 {
        return 0.0;
    }

    let area = footprint_overlap(a, b);
    if area <= 0.0 {
        return 0.0;
    }

    let inter = (area * dz).min(vol_a).min(vol_b);
    ratio(inter, vol_a + vol_b - inter)
}

/// Bird's-eye-view intersection-over-union, ignoring height.
pub fn iou_bev(a: &Box3d, b: &Box3d) -> f32 {
    let (a, b) = canonical_pair(a, b);
    let area_a = a.bev_area();
    let area_b = b.bev_area();
    if area_a <= 0.0 || area_b <= 0.0 {
        return 0.0;
    }
    let inter = footprint_overlap(a, b).min(area_a).min(area_b);
    ratio(inter, area_a + area_b - inter)
}

/// Area shared by the two footprints.
pub fn bev_intersection_area(a: &Box3d, b: &Box3d) -> f64 {
    let (a, b) = canonical_pair(a, b);
    footprint_overlap(a, b)
}

/// Length of the shared vertical interval; 0 when the boxes are stacked apart.
pub fn vertical_overlap(a: &Box3d, b: &Box3d) -> f64 {
    let (lo_a, hi_a) = a.z_range();
    let (lo_b, hi_b) = b.z_range();
    interval_overlap(lo_a, hi_a, lo_b, hi_b)
}

fn ratio(inter: f64, union: f64) -> f32 {
    if union <= 0.0 || inter <= 0.0 {
        return 0.0;
    }
    (inter / union).clamp(0.0, 1.0) as f32
}

fn footprint_overlap(a: &Box3d, b: &Box3d) -> f64 {
    if a.bev_area() <= 0.0 || b.bev_area() <= 0.0 {
        return 0.0;
    }

    let dx = a.x() as f64 - b.x() as f64;
    let dy = a.y() as f64 - b.y() as f64;
    let reach = a.bev_radius() + b.bev_radius();
    if dx * dx + dy * dy > reach * reach {
        return 0.0;
    }

    if a.heading() == 0.0 && b.heading() == 0.0 {
        return axis_aligned_overlap(a, b);
    }

    let clipped = clip_convex(&a.bev_corners(), &b.bev_corners());
    polygon_area(&clipped)
}

fn axis_aligned_overlap(a: &Box3d, b: &Box3d) -> f64 {
    let (ax, ay) = (a.x() as f64, a.y() as f64);
    let (bx, by) = (b.x() as f64, b.y() as f64);
    let (ahw, ahl) = (a.width() as f64 / 2.0, a.length() as f64 / 2.0);
    let (bhw, bhl) = (b.width() as f64 / 2.0, b.length() as f64 / 2.0);
    let ox = interval_overlap(ax - ahw, ax + ahw, bx - bhw, bx + bhw);
    let oy = interval_overlap(ay - ahl, ay + ahl, by - bhl, by + bhl);
    ox * oy
}

/// Orders a pair so that clipping always runs in the same direction.
fn canonical_pair<'a>(a: &'a Box3d, b: &'a Box3d) -> (&'a Box3d, &'a Box3d) {
    let ra = a.to_raw();
    let rb = b.to_raw();
    let ord = ra
        .iter()
        .zip(rb.iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal);
    if ord == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    }
}
