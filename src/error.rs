use thiserror::Error;

use crate::catalog::Category;

/// Why a category string was not accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no categories given")]
    Empty,

    #[error("unknown category '{0}': use a, b, c, d or all")]
    UnknownCategory(char),
}

/// Degenerate generation: the caller should show the message and stop the session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("no categories selected")]
    NoCategories,

    #[error("no conversions available for {0}")]
    NoDefinitions(Category),

    #[error("question limit of {0} reached before any question was asked")]
    LimitReached(usize),
}
