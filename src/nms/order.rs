//! Score ordering for candidate boxes.

use std::cmp::Ordering;

use crate::boxes::Box3d;

fn score_cmp_desc(a: &Box3d, b: &Box3d) -> Ordering {
    b.score().total_cmp(&a.score())
}

/// Sorts boxes by descending score.
///
/// The sort is stable, so boxes with identical scores stay in input order.
pub fn sort_by_score_desc(boxes: &mut [Box3d]) {
    boxes.sort_by(score_cmp_desc);
}
