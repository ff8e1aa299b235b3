use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{BoardSlot, CardId, ContentError, ScoreValue};
use crowns_protocol as wire;

/// One revealable question on the trivia board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Discount percentage the question is worth.
    pub value: ScoreValue,
    pub prompt: String,
    pub options: SmallVec<[String; 4]>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

impl Question {
    fn validate(&self) -> Result<(), ContentError> {
        if self.options.is_empty() {
            return Err(ContentError::NoOptions(self.prompt.clone()));
        }
        let repeated = self
            .options
            .iter()
            .enumerate()
            .any(|(i, option)| self.options[..i].contains(option));
        if repeated {
            return Err(ContentError::DuplicateOption(self.prompt.clone()));
        }
        if !self.options.contains(&self.correct_answer) {
            return Err(ContentError::CorrectAnswerMissing(self.prompt.clone()));
        }
        Ok(())
    }
}

impl From<wire::QuestionDto> for Question {
    fn from(dto: wire::QuestionDto) -> Self {
        Self {
            value: dto.value,
            prompt: dto.prompt,
            options: dto.options.into_iter().collect(),
            correct_answer: dto.correct_answer,
            explanation: dto.explanation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub questions: Vec<Question>,
}

impl From<wire::CategoryDto> for Category {
    fn from(dto: wire::CategoryDto) -> Self {
        Self {
            title: dto.title,
            questions: dto.questions.into_iter().map(Question::from).collect(),
        }
    }
}

/// A validated trivia board. Construction is the only place content is
/// checked; everything downstream can rely on its shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriviaDefinition {
    id: Option<String>,
    coupon_code: Option<String>,
    categories: Vec<Category>,
}

impl TriviaDefinition {
    /// Every category needs at least one question and every question must
    /// list its correct answer among its options.
    pub fn new(
        id: Option<String>,
        coupon_code: Option<String>,
        categories: Vec<Category>,
    ) -> Result<Self, ContentError> {
        if categories.is_empty() {
            return Err(ContentError::NoCategories);
        }
        for category in &categories {
            if category.questions.is_empty() {
                return Err(ContentError::EmptyCategory(category.title.clone()));
            }
            for question in &category.questions {
                question.validate()?;
            }
        }
        Ok(Self {
            id,
            coupon_code,
            categories,
        })
    }

    pub fn from_active(game: wire::ActiveGame<wire::TriviaPayload>) -> Result<Self, ContentError> {
        let id = game.data.id.or(game.id);
        let categories = game.data.categories.into_iter().map(Category::from).collect();
        Self::new(id, game.coupon_code, categories)
    }

    pub fn from_legacy(game: wire::LegacyTrivia) -> Result<Self, ContentError> {
        let categories = game.categories.into_iter().map(Category::from).collect();
        Self::new(Some(game.id), None, categories)
    }

    /// Campaign id used to match saved progress; boards without one are
    /// never persisted.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn question(&self, (category, question): BoardSlot) -> Option<&Question> {
        self.categories.get(category)?.questions.get(question)
    }

    pub fn total_questions(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.questions.len())
            .sum()
    }

    /// Score a perfect run earns.
    pub fn max_score(&self) -> ScoreValue {
        self.categories
            .iter()
            .flat_map(|category| &category.questions)
            .map(|question| question.value)
            .sum()
    }
}

/// One half of a pair; the same id appears once as a name card and once as
/// an image card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchCard {
    pub id: CardId,
    pub title: String,
    pub image: String,
}

impl From<wire::CardDto> for MatchCard {
    fn from(dto: wire::CardDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            image: dto.image,
        }
    }
}

/// The validated card catalog for the match game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchDefinition {
    coupon_code: Option<String>,
    cards: Vec<MatchCard>,
}

impl MatchDefinition {
    pub fn new(coupon_code: Option<String>, cards: Vec<MatchCard>) -> Result<Self, ContentError> {
        if cards.is_empty() {
            return Err(ContentError::NoCards);
        }
        for (i, card) in cards.iter().enumerate() {
            if cards[..i].iter().any(|other| other.id == card.id) {
                return Err(ContentError::DuplicateCardId(card.id.clone()));
            }
        }
        Ok(Self { coupon_code, cards })
    }

    pub fn from_active(game: wire::ActiveGame<wire::MatchPayload>) -> Result<Self, ContentError> {
        let cards = game.data.cards.into_iter().map(MatchCard::from).collect();
        Self::new(game.coupon_code, cards)
    }

    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    pub fn cards(&self) -> &[MatchCard] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&MatchCard> {
        self.cards.iter().find(|card| card.id == id)
    }
}
