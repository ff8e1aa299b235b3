use alloc::string::String;

/// Index of a category column on the trivia board.
pub type CategoryIx = usize;

/// Index of a question within its category.
pub type QuestionIx = usize;

/// Position of one question, `(category, question)`.
pub type BoardSlot = (CategoryIx, QuestionIx);

/// Discount percentage carried by a question value or a session score.
pub type ScoreValue = u32;

/// Identifier shared by the two halves of a match-game pair.
pub type CardId = String;
