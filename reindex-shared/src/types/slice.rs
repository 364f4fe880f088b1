//! Slice types for partitioning a search.
//!
//! A slice splits the documents matched by a search into `max` disjoint
//! portions that can be scrolled in parallel. The search engine assigns each
//! document to exactly one slice by hashing the slice field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field hashed to assign documents to slices when none is given.
pub const DEFAULT_SLICE_FIELD: &str = "_uid";

/// Errors raised when building a malformed slice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceError {
    /// A slice must partition into at least one portion.
    #[error("max must be greater than 0")]
    ZeroMax,

    /// The slice id does not address one of the `max` portions.
    #[error("max must be greater than id but was id=[{id}], max=[{max}]")]
    IdOutOfRange { id: u32, max: u32 },

    /// The slice field is empty.
    #[error("slice field must not be empty")]
    EmptyField,
}

/// One `(id, max)` partition key of a sliced search.
///
/// Fields are private so every `SliceSpec` in existence, including
/// deserialized ones, satisfies `id < max`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SliceSpecRepr")]
pub struct SliceSpec {
    field: String,
    id: u32,
    max: u32,
}

#[derive(Deserialize)]
struct SliceSpecRepr {
    #[serde(default = "default_slice_field")]
    field: String,
    id: u32,
    max: u32,
}

fn default_slice_field() -> String {
    DEFAULT_SLICE_FIELD.to_string()
}

impl TryFrom<SliceSpecRepr> for SliceSpec {
    type Error = SliceError;

    fn try_from(repr: SliceSpecRepr) -> Result<Self, Self::Error> {
        SliceSpec::with_field(repr.field, repr.id, repr.max)
    }
}

impl SliceSpec {
    /// Create a slice on the default slice field.
    ///
    /// # Example
    ///
    /// ```
    /// use reindex_shared::SliceSpec;
    ///
    /// let slice = SliceSpec::new(0, 4).expect("valid slice");
    /// assert_eq!(slice.field(), "_uid");
    /// ```
    pub fn new(id: u32, max: u32) -> Result<Self, SliceError> {
        Self::with_field(DEFAULT_SLICE_FIELD, id, max)
    }

    /// Create a slice that hashes a custom field.
    pub fn with_field(field: impl Into<String>, id: u32, max: u32) -> Result<Self, SliceError> {
        let field = field.into();
        if field.is_empty() {
            return Err(SliceError::EmptyField);
        }
        if max == 0 {
            return Err(SliceError::ZeroMax);
        }
        if id >= max {
            return Err(SliceError::IdOutOfRange { id, max });
        }
        Ok(Self { field, id, max })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Whether a document whose slice-field hash is `hash` belongs to this slice.
    pub fn owns(&self, hash: u64) -> bool {
        hash % u64::from(self.max) == u64::from(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_field() {
        let slice = SliceSpec::new(1, 3).unwrap();
        assert_eq!(slice.field(), DEFAULT_SLICE_FIELD);
        assert_eq!(slice.id(), 1);
        assert_eq!(slice.max(), 3);
    }

    #[test]
    fn test_rejects_malformed_slices() {
        assert_eq!(SliceSpec::new(0, 0), Err(SliceError::ZeroMax));
        assert_eq!(
            SliceSpec::new(4, 4),
            Err(SliceError::IdOutOfRange { id: 4, max: 4 })
        );
        assert_eq!(SliceSpec::with_field("", 0, 2), Err(SliceError::EmptyField));
    }

    #[test]
    fn test_single_slice_owns_everything() {
        let slice = SliceSpec::new(0, 1).unwrap();
        assert!((0..100).all(|hash| slice.owns(hash)));
    }

    #[test]
    fn test_slices_are_disjoint_and_cover_all_hashes() {
        let slices: Vec<SliceSpec> = (0..5).map(|id| SliceSpec::new(id, 5).unwrap()).collect();
        for hash in 0..1000u64 {
            let owners = slices.iter().filter(|s| s.owns(hash)).count();
            assert_eq!(owners, 1, "hash {} owned by {} slices", hash, owners);
        }
    }

    #[test]
    fn test_deserialization_defaults_field() {
        let slice: SliceSpec = serde_json::from_str(r#"{"id": 2, "max": 8}"#).unwrap();
        assert_eq!(slice, SliceSpec::new(2, 8).unwrap());
    }

    #[test]
    fn test_deserialization_rejects_out_of_range_id() {
        let result: Result<SliceSpec, _> = serde_json::from_str(r#"{"id": 8, "max": 8}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("max must be greater than id"), "{}", err);
    }
}
