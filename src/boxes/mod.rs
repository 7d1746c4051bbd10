//! Oriented 3-D box records.
//!
//! A `Box3d` is the unit the whole pipeline works on: one candidate detection
//! as emitted by the network, or one retained detection after suppression.
//! Fields are private so the invariants checked at construction hold for the
//! lifetime of the value.

mod raw;

pub use raw::{RawBoxes, RAW_BOX_FIELDS};

use crate::util::math::{rotate_offset, Point};
use crate::util::{PillarNmsError, PillarNmsResult};

/// One oriented 3-D detection box.
///
/// `width` spans the box's local x axis (the heading direction), `length` its
/// local y axis, and `height` the vertical axis. `heading` is the yaw in
/// radians, counter-clockwise from the world x axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box3d {
    x: f32,
    y: f32,
    z: f32,
    width: f32,
    length: f32,
    height: f32,
    heading: f32,
    class_id: u32,
    score: f32,
}

impl Box3d {
    /// Creates a box, rejecting non-finite values and negative extents.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x: f32,
        y: f32,
        z: f32,
        width: f32,
        length: f32,
        height: f32,
        heading: f32,
        class_id: u32,
        score: f32,
    ) -> PillarNmsResult<Self> {
        let bbox = Self {
            x,
            y,
            z,
            width,
            length,
            height,
            heading,
            class_id,
            score,
        };
        bbox.check().map_err(|reason| PillarNmsError::InvalidCandidate {
            index: 0,
            reason,
        })?;
        Ok(bbox)
    }

    pub(crate) fn check(&self) -> Result<(), &'static str> {
        if !self.score.is_finite() {
            return Err("score is not finite");
        }
        if !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite()) {
            return Err("center is not finite");
        }
        if !self.heading.is_finite() {
            return Err("heading is not finite");
        }
        for extent in [self.width, self.length, self.height] {
            if !extent.is_finite() {
                return Err("size is not finite");
            }
            if extent < 0.0 {
                return Err("size is negative");
            }
        }
        Ok(())
    }

    /// Center x coordinate in meters.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Center y coordinate in meters.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Center z coordinate in meters.
    pub fn z(&self) -> f32 {
        self.z
    }

    /// Extent along the local x axis.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Extent along the local y axis.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Yaw in radians.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Index into the caller's class-name list.
    pub fn class_id(&self) -> u32 {
        self.class_id
    }

    /// Detection confidence; higher is more confident.
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Box volume in cubic meters.
    pub fn volume(&self) -> f64 {
        self.width as f64 * self.length as f64 * self.height as f64
    }

    /// Footprint area in the horizontal plane.
    pub fn bev_area(&self) -> f64 {
        self.width as f64 * self.length as f64
    }

    /// Lower and upper z bounds.
    pub fn z_range(&self) -> (f64, f64) {
        let half = self.height as f64 / 2.0;
        (self.z as f64 - half, self.z as f64 + half)
    }

    /// Footprint corners in counter-clockwise order.
    pub fn bev_corners(&self) -> [[f64; 2]; 4] {
        let center: Point = [self.x as f64, self.y as f64];
        let half_w = self.width as f64 / 2.0;
        let half_l = self.length as f64 / 2.0;
        let (sin, cos) = (self.heading as f64).sin_cos();
        [
            rotate_offset(center, -half_w, -half_l, sin, cos),
            rotate_offset(center, half_w, -half_l, sin, cos),
            rotate_offset(center, half_w, half_l, sin, cos),
            rotate_offset(center, -half_w, half_l, sin, cos),
        ]
    }

    /// Radius of the footprint's circumscribed circle.
    pub(crate) fn bev_radius(&self) -> f64 {
        let w = self.width as f64;
        let l = self.length as f64;
        (w * w + l * l).sqrt() / 2.0
    }

    /// The nine raw fields in accelerator order: `x y z w l h rt id score`.
    pub fn to_raw(&self) -> [f32; RAW_BOX_FIELDS] {
        [
            self.x,
            self.y,
            self.z,
            self.width,
            self.length,
            self.height,
            self.heading,
            self.class_id as f32,
            self.score,
        ]
    }

    /// Builds a box from one raw record, reporting failures against `index`.
    pub fn from_raw(record: &[f32; RAW_BOX_FIELDS], index: usize) -> PillarNmsResult<Self> {
        let class_id = decode_class_id(record[7]).ok_or(PillarNmsError::InvalidClassId {
            index,
            value: record[7],
        })?;
        let bbox = Self {
            x: record[0],
            y: record[1],
            z: record[2],
            width: record[3],
            length: record[4],
            height: record[5],
            heading: record[6],
            class_id,
            score: record[8],
        };
        bbox.check()
            .map_err(|reason| PillarNmsError::InvalidCandidate { index, reason })?;
        Ok(bbox)
    }
}

fn decode_class_id(value: f32) -> Option<u32> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f32 {
        return None;
    }
    Some(value as u32)
}
