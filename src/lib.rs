//! pillarnms turns a PointPillars network's raw 3-D box candidates into a
//! filtered, labelled detection list.
//!
//! The crate provides the oriented box model, rotated 3-D IoU, greedy
//! non-maximum suppression and a post-processing driver that adapts the flat
//! candidate buffer an inference runtime hands back. Optional parallelism is
//! available via the `rayon` feature and structured logging via `tracing`.

pub mod boxes;
pub mod geometry;
pub mod lowlevel;
pub mod nms;
pub mod postprocess;
mod trace;
pub mod util;

pub use boxes::{Box3d, RawBoxes, RAW_BOX_FIELDS};
pub use geometry::{iou_3d, iou_bev};
pub use nms::{suppress, suppress_with, ClassMode, NmsConfig};
pub use postprocess::{ClassNames, Detection, PostProcessor};
pub use util::error::Result;
pub use util::{PillarNmsError, PillarNmsResult};
