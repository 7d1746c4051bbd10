//! Rayon-parallel suppression (feature-gated).
//!
//! Every pairwise overlap of the sorted candidates is evaluated in parallel
//! into one bit row per candidate, then a single sequential sweep replays the
//! greedy decision. Because `iou_3d` is bitwise symmetric the kept set is
//! identical to the sequential path.

use rayon::prelude::*;

use crate::boxes::Box3d;
use crate::geometry::iou_3d;
use crate::nms::ClassMode;

const WORD_BITS: usize = 64;

/// Row `i` has bit `j` set when candidate `i` would suppress candidate `j > i`.
pub(crate) fn suppression_mask_par(
    sorted: &[Box3d],
    iou_threshold: f32,
    class_mode: ClassMode,
) -> Vec<Vec<u64>> {
    let n = sorted.len();
    let words = n.div_ceil(WORD_BITS);
    (0..n)
        .into_par_iter()
        .map(|i| {
            let mut row = vec![0u64; words];
            let anchor = &sorted[i];
            for (j, other) in sorted.iter().enumerate().skip(i + 1) {
                if class_mode.compares(anchor, other) && iou_3d(anchor, other) >= iou_threshold {
                    row[j / WORD_BITS] |= 1u64 << (j % WORD_BITS);
                }
            }
            row
        })
        .collect()
}

pub(crate) fn greedy_masked_par(
    sorted: &[Box3d],
    iou_threshold: f32,
    class_mode: ClassMode,
) -> Vec<Box3d> {
    let mask = suppression_mask_par(sorted, iou_threshold, class_mode);
    let words = sorted.len().div_ceil(WORD_BITS);
    let mut removed = vec![0u64; words];
    let mut kept = Vec::new();

    for (i, (candidate, row)) in sorted.iter().zip(mask.iter()).enumerate() {
        if (removed[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1 {
            continue;
        }
        kept.push(*candidate);
        for (acc, bits) in removed.iter_mut().zip(row.iter()) {
            *acc |= *bits;
        }
    }

    kept
}
