use std::collections::TryReserveError;
use thiserror::Error;

/// Errors reported by the fallible (`try_*`) mutation methods.
///
/// The infallible methods never return these; like the `std` collections
/// they abort when an allocation fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Space for the updated key sequence or for the candidate tree could not
    /// be reserved.  Nothing was modified.
    #[error("could not reserve room for {requested} {what}")]
    Reserve {
        /// What was being reserved ("keys" or "tree nodes").
        what: &'static str,
        /// Number of elements requested.
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Result alias for the fallible mutation methods.
pub type Result<T> = std::result::Result<T, Error>;
