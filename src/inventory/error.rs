use thiserror::Error;

use crate::record::FieldErrors;
use crate::remote::StoreError;

/// Why a form submission did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected before any request was made
    #[error("Invalid form: {0}")]
    Invalid(#[from] FieldErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            SubmitError::Store(_) => None,
        }
    }
}
