use thiserror::Error;

/// Failure reported by the browser's native Picture-in-Picture calls.
///
/// None of these are fatal: a rejected request usually just means the page
/// had no user gesture to spend, so the engine logs and resynchronizes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The browser refused the call (typically a missing user gesture)
    #[error("Picture-in-Picture request was not allowed: {0}")]
    NotAllowed(String),

    /// Picture-in-Picture is disabled or absent on this page
    #[error("Picture-in-Picture is not supported here")]
    Unsupported,

    /// Any other failure surfaced by the platform
    #[error("Picture-in-Picture call failed: {0}")]
    Failed(String),
}

/// Failure while mutating the host document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The insertion reference is no longer a child of the target container
    #[error("Reference node is not a child of the insertion container")]
    NotAChild,

    /// The host document rejected the operation
    #[error("DOM operation failed: {0}")]
    Operation(String),
}

/// Failure while persisting the Picture-in-Picture window size.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The storage area could not be reached
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),

    /// The record could not be encoded
    #[error("Could not encode stored record: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        StorageError::Encode(format!("{value}"))
    }
}

/// The page origin does not belong to any supported site.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// No adapter is registered for the origin
    #[error("No site adapter for origin \"{0}\"")]
    Unsupported(String),
}
