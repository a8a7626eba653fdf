use thiserror::Error;

use crate::dom::DomError;
use crate::model::{QuizError, ThemeError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
