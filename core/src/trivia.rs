use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Score a session must reach before the coupon code is handed out.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriviaConfig {
    pub minimum_score: ScoreValue,
}

impl TriviaConfig {
    pub const fn new_unchecked(minimum_score: ScoreValue) -> Self {
        Self { minimum_score }
    }

    pub fn new(minimum_score: ScoreValue) -> Self {
        Self::new_unchecked(minimum_score.min(100))
    }
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self::new_unchecked(70)
    }
}

/// What is open on the board right now.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    /// No question is open.
    Idle,
    /// A question is open and waiting for an answer.
    Picked(BoardSlot),
    /// The open question was answered and is showing its feedback.
    Submitted { slot: BoardSlot, correct: bool },
}

impl Selection {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn slot(self) -> Option<BoardSlot> {
        match self {
            Self::Idle => None,
            Self::Picked(slot) | Self::Submitted { slot, .. } => Some(slot),
        }
    }
}

/// Result of grading one answer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub value: ScoreValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriviaEngine {
    definition: TriviaDefinition,
    config: TriviaConfig,
    phase: GamePhase,
    selection: Selection,
    answered: Vec<AnsweredRecord>,
    score: ScoreValue,
    reward_code: Option<String>,
}

impl TriviaEngine {
    pub fn new(definition: TriviaDefinition) -> Self {
        Self::with_config(definition, TriviaConfig::default())
    }

    pub fn with_config(definition: TriviaDefinition, config: TriviaConfig) -> Self {
        Self {
            definition,
            config,
            phase: Default::default(),
            selection: Selection::Idle,
            answered: Vec::new(),
            score: 0,
            reward_code: None,
        }
    }

    /// Rebuilds a session by replaying previously saved answers through the
    /// normal moves. A record that no longer fits the definition, or that
    /// grades differently than it did when saved, invalidates the whole
    /// save.
    pub fn restore(
        definition: TriviaDefinition,
        config: TriviaConfig,
        records: &[AnsweredRecord],
    ) -> Result<Self> {
        let mut engine = Self::with_config(definition, config);
        if records.is_empty() {
            return Ok(engine);
        }
        engine.start()?;
        for record in records {
            engine.select(record.category, record.question)?;
            let outcome = engine.submit(&record.selected)?;
            if outcome.correct != record.correct {
                return Err(GameError::StaleSave);
            }
            engine.close()?;
        }
        Ok(engine)
    }

    pub fn definition(&self) -> &TriviaDefinition {
        &self.definition
    }

    pub fn config(&self) -> TriviaConfig {
        self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Sum of the values of correctly answered questions.
    pub fn score(&self) -> ScoreValue {
        self.score
    }

    /// Answers given so far, in play order.
    pub fn answered(&self) -> &[AnsweredRecord] {
        &self.answered
    }

    /// Coupon earned by a finished session that reached the minimum score.
    pub fn reward_code(&self) -> Option<&str> {
        self.reward_code.as_deref()
    }

    pub fn is_answered(&self, category: CategoryIx, question: QuestionIx) -> bool {
        self.answered
            .iter()
            .any(|record| record.category == category && record.question == question)
    }

    /// The question behind the current selection, if any.
    pub fn open_question(&self) -> Option<&Question> {
        self.definition.question(self.selection.slot()?)
    }

    pub fn start(&mut self) -> Result<()> {
        self.check_initial()?;
        self.phase = GamePhase::InProgress;
        Ok(())
    }

    /// Opens a question. Only one can be open at a time and answered ones
    /// stay closed for the rest of the session.
    pub fn select(&mut self, category: CategoryIx, question: QuestionIx) -> Result<()> {
        self.check_in_progress()?;
        if !self.selection.is_idle() {
            return Err(GameError::SelectionPending);
        }
        if self.definition.question((category, question)).is_none() {
            return Err(GameError::UnknownItem);
        }
        if self.is_answered(category, question) {
            return Err(GameError::AlreadyAnswered);
        }
        self.selection = Selection::Picked((category, question));
        Ok(())
    }

    /// Grades the open question against `choice` and records the answer.
    pub fn submit(&mut self, choice: &str) -> Result<SubmitOutcome> {
        self.check_in_progress()?;
        let slot = match self.selection {
            Selection::Picked(slot) => slot,
            Selection::Submitted { .. } => return Err(GameError::AlreadyAnswered),
            Selection::Idle => return Err(GameError::NoSelection),
        };
        let Some(question) = self.definition.question(slot) else {
            return Err(GameError::UnknownItem);
        };

        let correct = question.correct_answer == choice;
        let value = question.value;
        self.answered.push(AnsweredRecord {
            category: slot.0,
            question: slot.1,
            selected: choice.to_owned(),
            correct,
        });
        if correct {
            self.score = self.score.saturating_add(value);
        }
        self.selection = Selection::Submitted { slot, correct };
        Ok(SubmitOutcome { correct, value })
    }

    /// Puts the open question away. Closing the last answer completes the
    /// board and settles the reward. Returns the phase after the close.
    pub fn close(&mut self) -> Result<GamePhase> {
        self.check_in_progress()?;
        if self.selection.is_idle() {
            return Err(GameError::NoSelection);
        }
        self.selection = Selection::Idle;
        if self.answered.len() == self.definition.total_questions() {
            self.phase = GamePhase::Complete;
            self.reward_code = self.compute_reward();
        }
        Ok(self.phase)
    }

    /// Returns the board to a fresh, unstarted session.
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.selection = Selection::Idle;
        self.answered.clear();
        self.score = 0;
        self.reward_code = None;
    }

    fn compute_reward(&self) -> Option<String> {
        if self.score < self.config.minimum_score {
            return None;
        }
        Some(match self.definition.coupon_code() {
            Some(code) => code.to_owned(),
            None => format!("WIG{}", self.score),
        })
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

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn question(value: ScoreValue, prompt: &str) -> Question {
        Question {
            value,
            prompt: prompt.to_string(),
            options: ["yes", "no"].iter().map(|&s| s.to_string()).collect(),
            correct_answer: "yes".to_string(),
            explanation: None,
        }
    }

    fn two_question_board(first: ScoreValue, second: ScoreValue) -> TriviaDefinition {
        TriviaDefinition::new(
            Some("08-04-2025-08-11-2025".to_string()),
            None,
            vec![
                Category {
                    title: "Wig Care".to_string(),
                    questions: vec![question(first, "First")],
                },
                Category {
                    title: "Styling".to_string(),
                    questions: vec![question(second, "Second")],
                },
            ],
        )
        .unwrap()
    }

    fn answer(engine: &mut TriviaEngine, slot: BoardSlot, choice: &str) -> GamePhase {
        engine.select(slot.0, slot.1).unwrap();
        engine.submit(choice).unwrap();
        engine.close().unwrap()
    }

    #[test]
    fn reaching_the_minimum_score_unlocks_a_code() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();

        answer(&mut engine, (0, 0), "yes");
        let phase = answer(&mut engine, (1, 0), "yes");

        assert_eq!(phase, GamePhase::Complete);
        assert_eq!(engine.score(), 70);
        assert_eq!(engine.reward_code(), Some("WIG70"));
    }

    #[test]
    fn a_wrong_answer_scores_nothing() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();

        answer(&mut engine, (0, 0), "yes");
        let phase = answer(&mut engine, (1, 0), "no");

        assert_eq!(phase, GamePhase::Complete);
        assert_eq!(engine.score(), 40);
        assert_eq!(engine.reward_code(), None);
    }

    #[test]
    fn a_score_just_below_the_minimum_earns_nothing() {
        let mut engine = TriviaEngine::new(two_question_board(40, 25));
        engine.start().unwrap();

        answer(&mut engine, (0, 0), "yes");
        answer(&mut engine, (1, 0), "yes");

        assert_eq!(engine.score(), 65);
        assert!(engine.phase().is_complete());
        assert_eq!(engine.reward_code(), None);
    }

    #[test]
    fn the_api_coupon_wins_over_the_generated_code() {
        let definition = TriviaDefinition::new(
            None,
            Some("SAVE15".to_string()),
            vec![Category {
                title: "Care".to_string(),
                questions: vec![question(80, "Only")],
            }],
        )
        .unwrap();
        let mut engine = TriviaEngine::new(definition);
        engine.start().unwrap();

        answer(&mut engine, (0, 0), "yes");

        assert_eq!(engine.reward_code(), Some("SAVE15"));
    }

    #[test]
    fn an_answered_question_cannot_be_reopened() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();
        answer(&mut engine, (0, 0), "yes");

        assert_eq!(engine.select(0, 0), Err(GameError::AlreadyAnswered));
        assert_eq!(engine.score(), 40);
        assert_eq!(engine.answered().len(), 1);
        assert!(engine.selection().is_idle());
    }

    #[test]
    fn unknown_positions_are_rejected() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();

        assert_eq!(engine.select(5, 0), Err(GameError::UnknownItem));
        assert_eq!(engine.select(0, 3), Err(GameError::UnknownItem));
    }

    #[test]
    fn only_one_question_can_be_open() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();
        engine.select(0, 0).unwrap();

        assert_eq!(engine.select(1, 0), Err(GameError::SelectionPending));
    }

    #[test]
    fn submitting_needs_an_open_question() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();

        assert_eq!(engine.submit("yes"), Err(GameError::NoSelection));

        engine.select(0, 0).unwrap();
        engine.submit("yes").unwrap();

        assert_eq!(engine.submit("yes"), Err(GameError::AlreadyAnswered));
        assert_eq!(engine.answered().len(), 1);
    }

    #[test]
    fn moves_need_a_started_game() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));

        assert_eq!(engine.select(0, 0), Err(GameError::NotInProgress));
        assert_eq!(engine.close(), Err(GameError::NotInProgress));

        engine.start().unwrap();
        assert_eq!(engine.start(), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn a_complete_board_accepts_no_more_moves() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();
        answer(&mut engine, (0, 0), "yes");
        answer(&mut engine, (1, 0), "yes");

        assert!(engine.phase().is_complete());
        assert_eq!(engine.select(0, 0), Err(GameError::NotInProgress));
        assert_eq!(engine.start(), Err(GameError::AlreadyStarted));
        assert!(engine.phase().is_complete());
    }

    #[test]
    fn closing_without_an_answer_keeps_the_question_available() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();

        engine.select(0, 0).unwrap();
        assert_eq!(engine.close(), Ok(GamePhase::InProgress));
        assert!(engine.selection().is_idle());
        assert!(engine.answered().is_empty());

        engine.select(0, 0).unwrap();
    }

    #[test]
    fn closing_with_nothing_open_is_rejected() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();

        assert_eq!(engine.close(), Err(GameError::NoSelection));
    }

    #[test]
    fn reset_returns_to_a_fresh_board() {
        let mut engine = TriviaEngine::new(two_question_board(40, 30));
        engine.start().unwrap();
        answer(&mut engine, (0, 0), "yes");
        answer(&mut engine, (1, 0), "yes");

        engine.reset();

        assert!(engine.phase().is_initial());
        assert_eq!(engine.score(), 0);
        assert!(engine.answered().is_empty());
        assert_eq!(engine.reward_code(), None);

        engine.start().unwrap();
        engine.select(0, 0).unwrap();
    }

    #[test]
    fn restore_replays_saved_answers() {
        let records = vec![AnsweredRecord {
            category: 0,
            question: 0,
            selected: "yes".to_string(),
            correct: true,
        }];
        let engine =
            TriviaEngine::restore(two_question_board(40, 30), TriviaConfig::default(), &records)
                .unwrap();

        assert!(engine.phase().is_in_progress());
        assert_eq!(engine.score(), 40);
        assert!(engine.is_answered(0, 0));
        assert!(!engine.is_answered(1, 0));
    }

    #[test]
    fn restoring_a_finished_run_completes_the_board() {
        let records = vec![
            AnsweredRecord {
                category: 0,
                question: 0,
                selected: "yes".to_string(),
                correct: true,
            },
            AnsweredRecord {
                category: 1,
                question: 0,
                selected: "yes".to_string(),
                correct: true,
            },
        ];
        let engine =
            TriviaEngine::restore(two_question_board(40, 30), TriviaConfig::default(), &records)
                .unwrap();

        assert!(engine.phase().is_complete());
        assert_eq!(engine.reward_code(), Some("WIG70"));
    }

    #[test]
    fn restore_rejects_records_that_no_longer_fit() {
        let out_of_range = vec![AnsweredRecord {
            category: 7,
            question: 0,
            selected: "yes".to_string(),
            correct: true,
        }];
        assert_eq!(
            TriviaEngine::restore(
                two_question_board(40, 30),
                TriviaConfig::default(),
                &out_of_range
            ),
            Err(GameError::UnknownItem)
        );

        let duplicated = vec![
            AnsweredRecord {
                category: 0,
                question: 0,
                selected: "yes".to_string(),
                correct: true,
            },
            AnsweredRecord {
                category: 0,
                question: 0,
                selected: "no".to_string(),
                correct: false,
            },
        ];
        assert_eq!(
            TriviaEngine::restore(
                two_question_board(40, 30),
                TriviaConfig::default(),
                &duplicated
            ),
            Err(GameError::AlreadyAnswered)
        );

        let regraded = vec![AnsweredRecord {
            category: 0,
            question: 0,
            selected: "no".to_string(),
            correct: true,
        }];
        assert_eq!(
            TriviaEngine::restore(
                two_question_board(40, 30),
                TriviaConfig::default(),
                &regraded
            ),
            Err(GameError::StaleSave)
        );
    }

    #[test]
    fn the_minimum_score_is_capped_at_one_hundred() {
        assert_eq!(TriviaConfig::new(250).minimum_score, 100);
        assert_eq!(TriviaConfig::default().minimum_score, 70);
    }
}
