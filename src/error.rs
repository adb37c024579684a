//! Error taxonomy shared by the stores, the catalog, and the resolver.

use std::path::PathBuf;

/// Short description of one catalog row, kept for ambiguity diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSummary {
    pub id: i64,
    pub manufacturer: String,
    pub turbine_type: String,
}

impl std::fmt::Display for CandidateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.id,
            self.manufacturer.trim(),
            self.turbine_type.trim()
        )
    }
}

/// Errors raised while resolving turbine and panel records.
///
/// [`AssetError::NotFound`] and [`AssetError::Ambiguous`] are recoverable:
/// the caller can refine the query and try again. See
/// [`AssetError::is_recoverable`].
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// No local file or no catalog row matched.
    #[error("no {kind} found for \"{name}\"")]
    NotFound { kind: &'static str, name: String },

    /// More than one catalog row matched; narrow the query, e.g. with an id.
    #[error("query matches {count} turbines, use an id for an unambiguous search")]
    Ambiguous {
        count: usize,
        candidates: Vec<CandidateSummary>,
    },

    /// The catalog could not be downloaded.
    #[error("catalog fetch failed: {0}")]
    RemoteFetchFailed(String),

    /// The catalog responded with a payload of unexpected shape.
    #[error("malformed catalog payload: {0}")]
    MalformedCatalog(String),

    /// A structured specification declared a source other than `oedb` or `local`.
    #[error("`source` should be either 'oedb' or 'local' (not: '{0}')")]
    InvalidSource(String),

    /// The specification shape is not recognized.
    #[error("unsupported turbine specification: {0}")]
    UnsupportedSpecification(String),

    /// A record was read but violates the record invariants.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("cannot access \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse \"{}\": {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("cannot serialize record: {0}")]
    Serialize(String),
}

impl AssetError {
    /// Returns `true` for outcomes a caller can fix by refining the query.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }
}
