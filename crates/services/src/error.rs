//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::dom::DomError;

/// Errors emitted by `QuizPage` and the behaviors it hosts.
///
/// Storage failures never show up here; they are absorbed where they occur.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PageError {
    #[error(transparent)]
    Dom(#[from] DomError),
}
