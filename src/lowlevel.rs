//! Building blocks for custom suppression pipelines.
//!
//! Most users should prefer `suppress` or `PostProcessor`. These items let a
//! caller that already sorts candidates, or wants the individual overlap
//! terms, skip the parts of the pipeline it does not need.

pub use crate::geometry::{bev_intersection_area, vertical_overlap};
pub use crate::nms::{sort_by_score_desc, suppress_sorted};
