//! Borrowed view over the accelerator's flat candidate buffer.

use super::Box3d;
use crate::util::{PillarNmsError, PillarNmsResult};

/// Number of `f32` values per raw record: `x y z w l h rt id score`.
pub const RAW_BOX_FIELDS: usize = 9;

/// Read-only view of `count` valid records at the front of a flat buffer.
///
/// The buffer may hold more records than are valid (the accelerator sizes it
/// for its maximum candidate count); only the first `count` are visited.
#[derive(Copy, Clone, Debug)]
pub struct RawBoxes<'a> {
    data: &'a [f32],
    count: usize,
}

impl<'a> RawBoxes<'a> {
    /// Creates a view in which every record of `data` is valid.
    pub fn from_slice(data: &'a [f32]) -> PillarNmsResult<Self> {
        let capacity = capacity_of(data)?;
        Ok(Self {
            data,
            count: capacity,
        })
    }

    /// Creates a view over the first `count` records of `data`.
    pub fn new(data: &'a [f32], count: usize) -> PillarNmsResult<Self> {
        let capacity = capacity_of(data)?;
        if count > capacity {
            let needed = count
                .checked_mul(RAW_BOX_FIELDS)
                .unwrap_or(usize::MAX);
            return Err(PillarNmsError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self { data, count })
    }

    /// Number of valid records.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` when no record is valid.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of records the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.data.len() / RAW_BOX_FIELDS
    }

    /// Returns record `index` if it is valid.
    pub fn record(&self, index: usize) -> Option<&'a [f32; RAW_BOX_FIELDS]> {
        if index >= self.count {
            return None;
        }
        let start = index * RAW_BOX_FIELDS;
        self.data
            .get(start..start + RAW_BOX_FIELDS)
            .and_then(|chunk| chunk.try_into().ok())
    }

    /// Iterates over the valid records.
    pub fn records(&self) -> impl Iterator<Item = &'a [f32; RAW_BOX_FIELDS]> + 'a {
        let data: &'a [f32] = self.data;
        data[..self.count * RAW_BOX_FIELDS]
            .chunks_exact(RAW_BOX_FIELDS)
            .filter_map(|chunk| chunk.try_into().ok())
    }

    /// Decodes every valid record into a `Box3d`.
    pub fn to_boxes(&self) -> PillarNmsResult<Vec<Box3d>> {
        let mut out = Vec::with_capacity(self.count);
        for (index, record) in self.records().enumerate() {
            out.push(Box3d::from_raw(record, index)?);
        }
        Ok(out)
    }
}

fn capacity_of(data: &[f32]) -> PillarNmsResult<usize> {
    if data.len() % RAW_BOX_FIELDS != 0 {
        return Err(PillarNmsError::InvalidBufferLength {
            len: data.len(),
            stride: RAW_BOX_FIELDS,
        });
    }
    Ok(data.len() / RAW_BOX_FIELDS)
}
