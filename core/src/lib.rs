#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use content::*;
pub use error::*;
pub use layout::*;
pub use matching::*;
pub use session::*;
pub use trivia::*;
pub use types::*;

mod catalog;
mod content;
mod error;
mod layout;
mod matching;
mod session;
mod trivia;
mod types;

/// Lifecycle shared by both games.
///
/// Valid transitions:
/// - `NotStarted -> InProgress` through `start`
/// - `InProgress -> Complete` through the move that clears the board
/// - any phase back to `NotStarted` through `reset`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Complete,
}

impl GamePhase {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::NotStarted
    }
}
