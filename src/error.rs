use thiserror::Error;

/// Result type alias for grip operations
pub type Result<T> = std::result::Result<T, GripError>;

/// Errors that can occur while resolving, ranking or projecting lookup records
#[derive(Error, Debug)]
pub enum GripError {
    /// A date/time string did not match any recognized grammar
    #[error("unable to parse time string: {0:?}")]
    Parse(String),

    /// A parsed month fell outside 1-12
    #[error("month {0} is out of range")]
    Range(u32),

    /// The record is missing a nested field required by the operation
    #[error("malformed RDAP record: {0}")]
    Structure(String),

    /// Ranking or selection was requested over zero entities
    #[error("no entities to rank")]
    EmptyInput,

    /// The address is unallocated or held by the IANA, so no registration exists
    #[error("{0} was not a valid IP or is reserved by the IANA")]
    ReservedAddress(String),

    /// The remote service could not be reached or sent an unusable body
    #[error("request failed: {0}")]
    Transport(String),

    /// An extraction pattern failed to compile
    #[cfg(feature = "lens-net")]
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Output could not be encoded as JSON
    #[error("Failed to serialize to JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File access error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GripError {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }

    /// Whether this error means "nothing to show" rather than a failure
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::ReservedAddress(_))
    }
}
