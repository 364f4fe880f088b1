//! Validation of reindex requests.
//!
//! Every rule is a pure check over the request that yields at most one
//! failure. All rules run on every request and their failures are collected
//! in declaration order, so a caller sees every problem at once.

use std::fmt;

use reindex_shared::VersionType;
use thiserror::Error;
use tracing::debug;

use crate::request::ReindexRequest;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A field is not allowed on this request type.
    UnsupportedField,
    /// Two settings are valid on their own but cannot be combined.
    ConflictingConfiguration,
    /// A setting holds a value outside its allowed range.
    InvalidValue,
    /// A required setting is absent.
    MissingField,
}

/// A single reason a reindex request cannot be dispatched.
///
/// None of these are transient; the request has to be changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationFailure {
    #[error("use _all if you really want to copy from all existing indexes")]
    MissingSourceIndices,

    #[error("from is not supported in this context")]
    FromUnsupported,

    #[error("stored_fields is not supported in this context")]
    StoredFieldsUnsupported,

    #[error("_source:false is not supported in this context")]
    SourceDisabled,

    #[error("slices must be at least 1 but was [{0}]")]
    ZeroSlices(u32),

    #[error("max_docs should be greater than 0 if the request is limited to some number of documents but it was [{0}]")]
    ZeroMaxDocs(u64),

    #[error("max_docs should be greater than or equal to slices but max_docs was [{max_docs}] and slices was [{slices}]")]
    MaxDocsBelowSlices { max_docs: u64, slices: u32 },

    #[error("requests_per_second must be greater than 0 but was [{0}]")]
    InvalidRequestsPerSecond(f32),

    #[error("index must be specified")]
    MissingDestinationIndex,

    #[error("routing must be unset, [keep], [discard] or [=<some new value>]")]
    InvalidRouting,

    #[error("unsupported version for internal versioning [{0}]")]
    InternalVersion(i64),

    #[error("setting ttl on destination isn't supported. use scripts instead.")]
    DestinationTtl,

    #[error("setting timestamp on destination isn't supported. use scripts instead.")]
    DestinationTimestamp,

    #[error("reindex from remote sources should use RemoteInfo's query instead of source's query")]
    RemoteWithSourceQuery,

    #[error("reindex from remote sources doesn't support workers > 1 but was [{0}]")]
    RemoteWithWorkers(u32),

    #[error("can't specify both slice and workers")]
    SliceWithWorkers,
}

impl ValidationFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingSourceIndices | Self::MissingDestinationIndex => FailureKind::MissingField,
            Self::FromUnsupported
            | Self::StoredFieldsUnsupported
            | Self::SourceDisabled
            | Self::InternalVersion(_)
            | Self::DestinationTtl
            | Self::DestinationTimestamp => FailureKind::UnsupportedField,
            Self::ZeroSlices(_)
            | Self::ZeroMaxDocs(_)
            | Self::InvalidRequestsPerSecond(_)
            | Self::InvalidRouting => FailureKind::InvalidValue,
            Self::MaxDocsBelowSlices { .. }
            | Self::RemoteWithSourceQuery
            | Self::RemoteWithWorkers(_)
            | Self::SliceWithWorkers => FailureKind::ConflictingConfiguration,
        }
    }
}

/// Every failure found in one request, in rule order.
///
/// Displays as `Validation Failed: 1: <first>;2: <second>;...`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors {
    failures: Vec<ValidationFailure>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<ValidationFailure>> for ValidationErrors {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation Failed: ")?;
        for (index, failure) in self.failures.iter().enumerate() {
            write!(f, "{}: {};", index + 1, failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

type Rule = fn(&ReindexRequest) -> Option<ValidationFailure>;

/// Rules in the order their failures are reported.
const RULES: &[Rule] = &[
    source_indices_present,
    from_unset,
    stored_fields_unset,
    source_enabled,
    slices_positive,
    max_docs_positive,
    max_docs_covers_slices,
    requests_per_second_positive,
    destination_index_present,
    routing_valid,
    version_supported,
    destination_ttl_unset,
    destination_timestamp_unset,
    remote_without_source_query,
    remote_without_workers,
    slice_without_workers,
];

/// Run every rule against `request`.
///
/// Returns the failures in rule order; an empty list means the request is valid.
pub fn validate(request: &ReindexRequest) -> Vec<ValidationFailure> {
    let failures: Vec<ValidationFailure> = RULES.iter().filter_map(|rule| rule(request)).collect();
    if !failures.is_empty() {
        debug!(
            failure_count = failures.len(),
            destination = ?request.destination.index,
            "Reindex request failed validation"
        );
    }
    failures
}

fn source_indices_present(request: &ReindexRequest) -> Option<ValidationFailure> {
    request
        .source
        .indices
        .is_empty()
        .then_some(ValidationFailure::MissingSourceIndices)
}

fn from_unset(request: &ReindexRequest) -> Option<ValidationFailure> {
    request
        .source
        .from
        .map(|_| ValidationFailure::FromUnsupported)
}

fn stored_fields_unset(request: &ReindexRequest) -> Option<ValidationFailure> {
    request
        .source
        .stored_fields
        .as_ref()
        .map(|_| ValidationFailure::StoredFieldsUnsupported)
}

fn source_enabled(request: &ReindexRequest) -> Option<ValidationFailure> {
    (request.source.fetch_source == Some(false)).then_some(ValidationFailure::SourceDisabled)
}

fn slices_positive(request: &ReindexRequest) -> Option<ValidationFailure> {
    (request.slices == 0).then_some(ValidationFailure::ZeroSlices(request.slices))
}

fn max_docs_positive(request: &ReindexRequest) -> Option<ValidationFailure> {
    match request.max_docs {
        Some(0) => Some(ValidationFailure::ZeroMaxDocs(0)),
        _ => None,
    }
}

// Each slice has to receive at least one document of the budget.
fn max_docs_covers_slices(request: &ReindexRequest) -> Option<ValidationFailure> {
    match request.max_docs {
        Some(max_docs)
            if max_docs > 0 && request.is_sliced() && max_docs < u64::from(request.slices) =>
        {
            Some(ValidationFailure::MaxDocsBelowSlices {
                max_docs,
                slices: request.slices,
            })
        }
        _ => None,
    }
}

fn requests_per_second_positive(request: &ReindexRequest) -> Option<ValidationFailure> {
    match request.requests_per_second {
        Some(rps) if !rps.is_finite() || rps <= 0.0 => Some(ValidationFailure::InvalidRequestsPerSecond(rps)),
        _ => None,
    }
}

fn destination_index_present(request: &ReindexRequest) -> Option<ValidationFailure> {
    (!request.destination.has_index()).then_some(ValidationFailure::MissingDestinationIndex)
}

fn routing_valid(request: &ReindexRequest) -> Option<ValidationFailure> {
    (!request.destination.routing_is_valid()).then_some(ValidationFailure::InvalidRouting)
}

fn version_supported(request: &ReindexRequest) -> Option<ValidationFailure> {
    match (request.destination.version_type, request.destination.version) {
        (VersionType::Internal, Some(version)) => Some(ValidationFailure::InternalVersion(version)),
        _ => None,
    }
}

fn destination_ttl_unset(request: &ReindexRequest) -> Option<ValidationFailure> {
    request
        .destination
        .ttl
        .as_ref()
        .map(|_| ValidationFailure::DestinationTtl)
}

fn destination_timestamp_unset(request: &ReindexRequest) -> Option<ValidationFailure> {
    request
        .destination
        .timestamp
        .as_ref()
        .map(|_| ValidationFailure::DestinationTimestamp)
}

fn remote_without_source_query(request: &ReindexRequest) -> Option<ValidationFailure> {
    (request.remote_info.is_some() && request.source.has_query())
        .then_some(ValidationFailure::RemoteWithSourceQuery)
}

fn remote_without_workers(request: &ReindexRequest) -> Option<ValidationFailure> {
    (request.remote_info.is_some() && request.is_sliced())
        .then_some(ValidationFailure::RemoteWithWorkers(request.slices))
}

fn slice_without_workers(request: &ReindexRequest) -> Option<ValidationFailure> {
    (request.source.slice.is_some() && request.is_sliced())
        .then_some(ValidationFailure::SliceWithWorkers)
}
