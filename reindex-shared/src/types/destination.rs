//! Destination types for reindex requests.
//!
//! The destination names the index documents are written to and the write
//! options applied to every copied document.

use serde::{Deserialize, Serialize};

/// How document versions are checked on write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    /// Versions are assigned by the destination index.
    #[default]
    Internal,
    /// The copied document's version must be greater than the stored one.
    External,
    /// The copied document's version must be greater than or equal to the stored one.
    ExternalGte,
    /// The copied document's version is written unconditionally.
    Force,
}

/// Write operation used for each document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OpType {
    /// Create or overwrite.
    #[default]
    Index,
    /// Create only; existing documents are conflicts.
    Create,
}

/// Target index and write options.
///
/// `ttl` and `timestamp` exist so that requests carrying them can be
/// rejected; a script is the supported way to set either.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// `keep`, `discard`, `=<value>` or unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<String>,

    /// Ingest pipeline run on each document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,

    #[serde(default)]
    pub version_type: VersionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(default)]
    pub op_type: OpType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Destination {
    /// Create a destination writing into `index` with default options.
    ///
    /// # Example
    ///
    /// ```
    /// use reindex_shared::Destination;
    ///
    /// let dest = Destination::new("dest").with_routing("keep");
    /// assert_eq!(dest.index.as_deref(), Some("dest"));
    /// assert!(dest.routing_is_valid());
    /// ```
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: Some(index.into()),
            ..Self::default()
        }
    }

    pub fn with_routing(mut self, routing: impl Into<String>) -> Self {
        self.routing = Some(routing.into());
        self
    }

    pub fn with_pipeline(mut self, pipeline: impl Into<String>) -> Self {
        self.pipeline = Some(pipeline.into());
        self
    }

    pub fn with_version_type(mut self, version_type: VersionType) -> Self {
        self.version_type = version_type;
        self
    }

    pub fn with_op_type(mut self, op_type: OpType) -> Self {
        self.op_type = op_type;
        self
    }

    pub fn with_ttl(mut self, ttl: impl Into<String>) -> Self {
        self.ttl = Some(ttl.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Whether a target index is named.
    pub fn has_index(&self) -> bool {
        self.index.as_deref().is_some_and(|index| !index.is_empty())
    }

    /// Whether routing is unset, `keep`, `discard`, or an `=<value>` override.
    pub fn routing_is_valid(&self) -> bool {
        match self.routing.as_deref() {
            None | Some("keep") | Some("discard") => true,
            Some(routing) => routing.starts_with('='),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_destination_defaults() {
        let dest = Destination::new("dest");
        assert!(dest.has_index());
        assert_eq!(dest.version_type, VersionType::Internal);
        assert_eq!(dest.op_type, OpType::Index);
        assert!(dest.ttl.is_none());
        assert!(dest.timestamp.is_none());
    }

    #[test]
    fn test_has_index() {
        assert!(!Destination::default().has_index());
        assert!(!Destination::new("").has_index());
    }

    #[test]
    fn test_routing_is_valid() {
        assert!(Destination::new("d").routing_is_valid());
        assert!(Destination::new("d").with_routing("keep").routing_is_valid());
        assert!(Destination::new("d").with_routing("discard").routing_is_valid());
        assert!(Destination::new("d").with_routing("=tenant-1").routing_is_valid());
        assert!(!Destination::new("d").with_routing("tenant-1").routing_is_valid());
    }

    #[test]
    fn test_version_type_serialization() {
        let json = serde_json::to_string(&VersionType::ExternalGte).unwrap();
        assert_eq!(json, r#""external_gte""#);
    }
}
