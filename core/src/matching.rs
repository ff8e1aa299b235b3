use alloc::borrow::ToOwned;
use alloc::collections::BTreeSet;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// Coupon handed out when the API did not attach one to the game.
const FALLBACK_COUPON: &str = "CROWN20";

/// How many pairs are dealt onto the board out of the full card set.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub max_pairs: usize,
}

impl MatchConfig {
    pub const fn new_unchecked(max_pairs: usize) -> Self {
        Self { max_pairs }
    }

    pub fn new(max_pairs: usize) -> Self {
        Self::new_unchecked(max_pairs.max(1))
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new_unchecked(8)
    }
}

/// Result of pairing an image with the selected name.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Matched,
    Mismatched,
}

impl MatchOutcome {
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Matched)
    }
}

/// What is picked on the board right now.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchSelection {
    /// Nothing is picked.
    Idle,
    /// A name card is selected and waits for an image.
    TermPicked(CardId),
    /// An image was paired with the name and is showing its feedback.
    Submitted {
        term: CardId,
        image: CardId,
        matched: bool,
    },
}

impl MatchSelection {
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The selected name card, in any sub-state that has one.
    pub fn term(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::TermPicked(term) | Self::Submitted { term, .. } => Some(term),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    definition: MatchDefinition,
    layout: MatchLayout,
    matched: BTreeSet<CardId>,
    selection: MatchSelection,
    phase: GamePhase,
    tries: u32,
    elapsed_secs: u32,
    reward_code: Option<String>,
}

impl MatchEngine {
    pub fn new(definition: MatchDefinition, layout: MatchLayout) -> Self {
        Self {
            definition,
            layout,
            matched: BTreeSet::new(),
            selection: MatchSelection::Idle,
            phase: Default::default(),
            tries: 0,
            elapsed_secs: 0,
            reward_code: None,
        }
    }

    pub fn definition(&self) -> &MatchDefinition {
        &self.definition
    }

    pub fn layout(&self) -> &MatchLayout {
        &self.layout
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn selection(&self) -> &MatchSelection {
        &self.selection
    }

    /// Image picks made so far, matched or not.
    pub fn tries(&self) -> u32 {
        self.tries
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Coupon handed out once the board is cleared.
    pub fn reward_code(&self) -> Option<&str> {
        self.reward_code.as_deref()
    }

    pub fn total_pairs(&self) -> usize {
        self.layout.pair_count()
    }

    pub fn remaining_pairs(&self) -> usize {
        self.layout.pair_count() - self.matched.len()
    }

    pub fn is_matched(&self, id: &str) -> bool {
        self.matched.contains(id)
    }

    /// Name cards still on the board, in dealt order.
    pub fn term_cards(&self) -> impl Iterator<Item = &MatchCard> {
        self.card_column(self.layout.terms())
    }

    /// Image cards still on the board, in dealt order.
    pub fn image_cards(&self) -> impl Iterator<Item = &MatchCard> {
        self.card_column(self.layout.images())
    }

    pub fn start(&mut self) -> Result<()> {
        self.check_initial()?;
        self.phase = GamePhase::InProgress;
        Ok(())
    }

    /// Picks a name card. Picking it again puts it back; picking another
    /// name moves the selection.
    pub fn select_term(&mut self, id: &str) -> Result<()> {
        self.check_in_progress()?;
        if !self.in_play(id) {
            return Err(GameError::UnknownCard);
        }
        self.selection = match &self.selection {
            MatchSelection::Submitted { .. } => return Err(GameError::SelectionPending),
            MatchSelection::TermPicked(term) if term == id => MatchSelection::Idle,
            _ => MatchSelection::TermPicked(id.to_owned()),
        };
        Ok(())
    }

    /// Pairs an image card with the selected name card. Every pick counts
    /// as a try, matched or not.
    pub fn select_match(&mut self, id: &str) -> Result<MatchOutcome> {
        self.check_in_progress()?;
        if !self.in_play(id) {
            return Err(GameError::UnknownCard);
        }
        let term = match &self.selection {
            MatchSelection::TermPicked(term) => term.clone(),
            MatchSelection::Submitted { .. } => return Err(GameError::SelectionPending),
            MatchSelection::Idle => return Err(GameError::NoTermSelected),
        };
        self.tries = self.tries.saturating_add(1);
        let outcome = if term == id {
            MatchOutcome::Matched
        } else {
            MatchOutcome::Mismatched
        };
        self.selection = MatchSelection::Submitted {
            term,
            image: id.to_owned(),
            matched: outcome.is_match(),
        };
        Ok(outcome)
    }

    /// Clears the pending pick, removing the pair from the board when it
    /// matched. Clearing the last pair completes the game and settles the
    /// coupon. Returns the phase after the close.
    pub fn close(&mut self) -> Result<GamePhase> {
        self.check_in_progress()?;
        if self.selection.is_idle() {
            return Err(GameError::NoSelection);
        }
        let closed = core::mem::replace(&mut self.selection, MatchSelection::Idle);
        if let MatchSelection::Submitted { term, matched: true, .. } = closed {
            self.matched.insert(term);
            if self.remaining_pairs() == 0 {
                self.phase = GamePhase::Complete;
                self.reward_code = Some(
                    self.definition
                        .coupon_code()
                        .unwrap_or(FALLBACK_COUPON)
                        .to_owned(),
                );
            }
        }
        Ok(self.phase)
    }

    /// Advances the play clock by one second.
    pub fn tick(&mut self) {
        if self.phase.is_in_progress() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    /// Puts every dealt card back on the board and zeroes the counters.
    /// The layout itself is kept, so the same board can be replayed.
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.selection = MatchSelection::Idle;
        self.matched.clear();
        self.tries = 0;
        self.elapsed_secs = 0;
        self.reward_code = None;
    }

    fn in_play(&self, id: &str) -> bool {
        self.layout.contains(id) && !self.is_matched(id)
    }

    fn card_column<'a>(&'a self, ids: &'a [CardId]) -> impl Iterator<Item = &'a MatchCard> {
        ids.iter()
            .filter(|id| !self.matched.contains(id.as_str()))
            .filter_map(|id| self.definition.card(id))
    }

    fn check_initial(&self) -> Result<()> {
        if self.phase.is_initial() {
            Ok(())
        } else {
            Err(GameError::AlreadyStarted)
        }
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.phase.is_in_progress() {
            Ok(())
        } else {
            Err(GameError::NotInProgress)
        }
    }
}
