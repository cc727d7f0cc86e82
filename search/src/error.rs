//! Typed search errors.
//!
//! `SearchError` covers pre-flight rejections and oracle failures. Running
//! out of depth, frontier or time is not an error; those end the search with
//! [`crate::search::SearchOutcome::NotFound`].

use crate::contract::{OracleError, OracleOperation};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The policy was rejected before any oracle call was made.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
    /// An oracle call failed. The oracle's error is kept unchanged.
    #[error("oracle {operation} failed: {source}")]
    Oracle {
        operation: OracleOperation,
        #[source]
        source: OracleError,
    },
}

impl SearchError {
    pub(crate) fn oracle(operation: OracleOperation) -> impl FnOnce(OracleError) -> Self {
        move |source| Self::Oracle { operation, source }
    }
}
