use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game is not in progress")]
    NotInProgress,
    #[error("Game already started")]
    AlreadyStarted,
    #[error("No category or question at the requested position")]
    UnknownItem,
    #[error("Question already answered")]
    AlreadyAnswered,
    #[error("Another pick is still waiting to be closed")]
    SelectionPending,
    #[error("Nothing is currently picked")]
    NoSelection,
    #[error("No card with that id remains on the board")]
    UnknownCard,
    #[error("Pick a name card before an image card")]
    NoTermSelected,
    #[error("Layout columns do not hold the same cards")]
    InvalidLayout,
    #[error("Saved progress does not match the current game")]
    StaleSave,
}

/// Content that fails validation after it decoded cleanly off the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Game has no categories")]
    NoCategories,
    #[error("Category {0:?} has no questions")]
    EmptyCategory(String),
    #[error("Question {0:?} has no answer options")]
    NoOptions(String),
    #[error("Question {0:?} repeats an answer option")]
    DuplicateOption(String),
    #[error("Question {0:?} lists a correct answer that is not among its options")]
    CorrectAnswerMissing(String),
    #[error("Game has no cards")]
    NoCards,
    #[error("Card id {0:?} appears more than once")]
    DuplicateCardId(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
