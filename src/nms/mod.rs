//! Greedy non-maximum suppression over oriented 3-D boxes.
//!
//! Candidates are ranked by score, capped, and then swept once: a candidate
//! survives only if its 3-D IoU with every box kept so far is strictly below
//! the threshold. Suppression is class-agnostic unless `ClassMode::PerClass`
//! is requested.

pub(crate) mod greedy;
pub(crate) mod order;
#[cfg(feature = "rayon")]
pub(crate) mod rayon;

use crate::boxes::Box3d;
use crate::trace::{trace_event, trace_reject, trace_span};
use crate::util::{PillarNmsError, PillarNmsResult};

pub use order::sort_by_score_desc;

/// Which candidate pairs are allowed to suppress each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClassMode {
    /// Every pair is compared, whatever the class ids.
    #[default]
    Agnostic,
    /// Only boxes sharing a class id are compared.
    PerClass,
}

impl ClassMode {
    #[inline]
    pub(crate) fn compares(self, a: &Box3d, b: &Box3d) -> bool {
        match self {
            ClassMode::Agnostic => true,
            ClassMode::PerClass => a.class_id() == b.class_id(),
        }
    }
}

/// Suppression parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct NmsConfig {
    /// Overlap at or above which the lower-scored box is dropped, in `[0, 1]`.
    pub iou_threshold: f32,
    /// Number of top-scored candidates considered; at least 1.
    pub max_output: usize,
    /// Class gating for suppression.
    pub class_mode: ClassMode,
    /// Build the pairwise overlap mask with rayon (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for NmsConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.01,
            max_output: 4096,
            class_mode: ClassMode::Agnostic,
            parallel: false,
        }
    }
}

impl NmsConfig {
    /// Creates a class-agnostic, sequential configuration.
    pub fn new(iou_threshold: f32, max_output: usize) -> Self {
        Self {
            iou_threshold,
            max_output,
            ..Self::default()
        }
    }

    /// Sets the class gating mode.
    pub fn with_class_mode(mut self, class_mode: ClassMode) -> Self {
        self.class_mode = class_mode;
        self
    }

    /// Enables or disables the parallel overlap mask.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the threshold range and the candidate cap.
    pub fn validate(&self) -> PillarNmsResult<()> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(PillarNmsError::InvalidIouThreshold {
                value: self.iou_threshold,
            });
        }
        if self.max_output == 0 {
            return Err(PillarNmsError::InvalidMaxOutput {
                value: self.max_output,
            });
        }
        Ok(())
    }
}

/// Class-agnostic greedy NMS.
///
/// Returns the kept boxes in descending score order. Exact score ties keep
/// their input order. At most `max_output` candidates are considered, so at
/// most that many are returned.
pub fn suppress(
    candidates: &[Box3d],
    iou_threshold: f32,
    max_output: usize,
) -> PillarNmsResult<Vec<Box3d>> {
    suppress_with(candidates, &NmsConfig::new(iou_threshold, max_output))
}

/// Greedy NMS with explicit configuration.
pub fn suppress_with(candidates: &[Box3d], cfg: &NmsConfig) -> PillarNmsResult<Vec<Box3d>> {
    if let Err(err) = cfg.validate() {
        trace_reject!(err);
        return Err(err);
    }

    let _span = trace_span!(
        "suppress",
        candidates = candidates.len(),
        iou_threshold = cfg.iou_threshold as f64,
        max_output = cfg.max_output
    )
    .entered();

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let mut sorted = candidates.to_vec();
    sort_by_score_desc(&mut sorted);
    sorted.truncate(cfg.max_output);

    let kept = suppress_sorted(&sorted, cfg);
    trace_event!("nms_kept", considered = sorted.len(), kept = kept.len());
    Ok(kept)
}

/// Greedy sweep over candidates already in descending score order.
///
/// No sorting, truncation or validation happens here.
pub fn suppress_sorted(sorted: &[Box3d], cfg: &NmsConfig) -> Vec<Box3d> {
    #[cfg(feature = "rayon")]
    if cfg.parallel {
        return self::rayon::greedy_masked_par(sorted, cfg.iou_threshold, cfg.class_mode);
    }
    greedy::greedy(sorted, cfg.iou_threshold, cfg.class_mode)
}
