//! Sequential greedy sweep.

use crate::boxes::Box3d;
use crate::geometry::iou_3d;
use crate::nms::ClassMode;

/// Keeps each candidate whose overlap with every kept box is below `iou_threshold`.
pub(crate) fn greedy(sorted: &[Box3d], iou_threshold: f32, class_mode: ClassMode) -> Vec<Box3d> {
    let mut kept: Vec<Box3d> = Vec::new();

    'outer: for candidate in sorted {
        for kept_box in kept.iter() {
            if class_mode.compares(candidate, kept_box)
                && iou_3d(candidate, kept_box) >= iou_threshold
            {
                continue 'outer;
            }
        }
        kept.push(*candidate);
    }

    kept
}
