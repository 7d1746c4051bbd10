//! Class-name lookup supplied by the caller.

use crate::util::{PillarNmsError, PillarNmsResult};

/// Ordered class labels addressed by the network's class id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassNames {
    names: Vec<String>,
}

impl ClassNames {
    /// Builds a label list, rejecting empty labels.
    pub fn new<I, S>(names: I) -> PillarNmsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if let Some(index) = names.iter().position(|name| name.trim().is_empty()) {
            return Err(PillarNmsError::EmptyClassName { index });
        }
        Ok(Self { names })
    }

    /// Parses a comma-separated list such as `"Car,Pedestrian,Cyclist"`.
    ///
    /// Labels are trimmed. A trailing comma is tolerated; any other empty
    /// label is an error.
    pub fn parse_list(list: &str) -> PillarNmsResult<Self> {
        let mut parts: Vec<&str> = list.split(',').map(str::trim).collect();
        if parts.len() > 1 && parts.last() == Some(&"") {
            parts.pop();
        }
        if parts == [""] {
            return Ok(Self::default());
        }
        Self::new(parts)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when there are no labels.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Label for `class_id`, or `None` when it is out of range.
    pub fn get(&self, class_id: u32) -> Option<&str> {
        self.names.get(class_id as usize).map(String::as_str)
    }

    /// Label for `class_id`, failing with `ClassIdOutOfRange`.
    pub fn resolve(&self, class_id: u32) -> PillarNmsResult<&str> {
        self.get(class_id)
            .ok_or(PillarNmsError::ClassIdOutOfRange {
                class_id,
                num_classes: self.names.len(),
            })
    }

    /// Iterates over the labels in id order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
