//! Post-processing of raw network output into labelled detections.
//!
//! `PostProcessor` owns the suppression settings and the label list, and turns
//! one frame's raw candidate buffer into a score-ordered list of detections.
//! It keeps no per-frame state: results go into a buffer the caller owns.

mod labels;

pub use labels::ClassNames;

use crate::boxes::{Box3d, RawBoxes};
use crate::nms::{suppress_with, NmsConfig};
use crate::trace::{trace_event, trace_reject, trace_span};
use crate::util::PillarNmsResult;

/// A retained box with its resolved class label.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// The suppressed-and-kept box.
    pub bbox: Box3d,
    /// Label looked up from the box's class id.
    pub label: String,
}

/// Decodes, suppresses and labels raw candidates.
#[derive(Clone, Debug)]
pub struct PostProcessor {
    cfg: NmsConfig,
    class_names: ClassNames,
}

impl PostProcessor {
    /// Creates a post-processor, validating the suppression settings up front.
    pub fn new(cfg: NmsConfig, class_names: ClassNames) -> PillarNmsResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg, class_names })
    }

    /// Suppression settings in use.
    pub fn config(&self) -> &NmsConfig {
        &self.cfg
    }

    /// Label list in use.
    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }

    /// Materializes every valid raw record as a `Box3d`.
    pub fn decode(&self, raw: RawBoxes<'_>) -> PillarNmsResult<Vec<Box3d>> {
        let _span = trace_span!("decode", count = raw.len(), capacity = raw.capacity()).entered();
        raw.to_boxes().inspect_err(|err| {
            trace_reject!(err);
        })
    }

    /// Runs the full pipeline into `out`, which is cleared first.
    ///
    /// Every candidate's class id is checked against the label list before
    /// suppression, so a drifted label list fails even when the offending box
    /// would have been suppressed. On error `out` is left empty.
    pub fn process_into(
        &self,
        raw: RawBoxes<'_>,
        out: &mut Vec<Detection>,
    ) -> PillarNmsResult<()> {
        out.clear();
        let _span = trace_span!("postprocess", count = raw.len()).entered();

        let candidates = self.decode(raw)?;
        for bbox in &candidates {
            if let Err(err) = self.class_names.resolve(bbox.class_id()) {
                trace_reject!(err);
                return Err(err);
            }
        }

        let kept = suppress_with(&candidates, &self.cfg)?;
        out.reserve(kept.len());
        for bbox in kept {
            let label = self.class_names.resolve(bbox.class_id())?.to_owned();
            out.push(Detection { bbox, label });
        }

        trace_event!("detections", candidates = candidates.len(), kept = out.len());
        Ok(())
    }

    /// Runs the full pipeline into a fresh vector.
    pub fn process(&self, raw: RawBoxes<'_>) -> PillarNmsResult<Vec<Detection>> {
        let mut out = Vec::new();
        self.process_into(raw, &mut out)?;
        Ok(out)
    }
}
