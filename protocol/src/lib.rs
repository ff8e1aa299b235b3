//! Wire types shared between the web app and the Boss Crowns content API,
//! plus the locally persisted progress record. Field names follow the JSON
//! the server actually sends, so everything here is camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Production content API.
pub const DEFAULT_API_BASE: &str = "https://bosscrowns-api-a228488a1e46.herokuapp.com/bosscrowns";

/// Which game the active-game endpoint should return.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    Jeopardy,
    MatchGame,
}

impl GameType {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameType::Jeopardy => "jeopardy",
            GameType::MatchGame => "match-game",
        }
    }
}

pub fn active_game_url(base: &str, game_type: GameType) -> String {
    format!("{}/jeopardy/active?type={}", base.trim_end_matches('/'), game_type.as_str())
}

/// Legacy endpoint, still served for boards published before the envelope
/// format existed.
pub fn latest_game_url(base: &str) -> String {
    format!("{}/jeopardy/latest", base.trim_end_matches('/'))
}

pub fn color_index_url(base: &str) -> String {
    format!("{}/colorIndex", base.trim_end_matches('/'))
}

/// Envelope returned by the active-game endpoint. The coupon code and the
/// campaign id are optional; older campaigns carry the id inside `data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGame<T> {
    pub coupon_code: Option<String>,
    pub id: Option<String>,
    pub data: T,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriviaPayload {
    pub id: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuestionDto>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub value: u32,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

/// Shape served by `/jeopardy/latest`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyTrivia {
    pub id: String,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchPayload {
    #[serde(default)]
    pub cards: Vec<CardDto>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDto {
    /// Pair identifier; the backend is inconsistent about sending these as
    /// strings or numbers, so both are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
}

/// One row of the `/colorIndex` catalog. Most fields are optional on the
/// wire and default to empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRecord {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub rooted: bool,
    #[serde(default)]
    pub highlighted: bool,
    pub code: Option<String>,
    #[serde(default)]
    pub image: Vec<String>,
    pub video: Option<String>,
}

/// Trivia progress persisted in local storage under a single namespaced key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProgress {
    pub saved_game_id: String,
    pub saved_score: u32,
    pub saved_answered_questions: Vec<SavedAnswer>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnswer {
    pub category_index: usize,
    pub question_index: usize,
    pub selected_option: String,
    pub correct: bool,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl serde::de::Visitor<'_> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrap(#[serde(deserialize_with = "string_or_number")] String);

    Ok(Option::<Wrap>::deserialize(deserializer)?.map(|Wrap(v)| v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_trivia_envelope_parses() {
        let json = r#"{
            "couponCode": "SAVE15",
            "data": {
                "id": "08-04-2025-08-11-2025",
                "categories": [{
                    "title": "Wig Care",
                    "questions": [{
                        "value": 10,
                        "question": "How often should you wash a synthetic wig?",
                        "options": ["Every day", "Every 6-8 wears"],
                        "correctAnswer": "Every 6-8 wears",
                        "explanation": "Overwashing shortens fiber life."
                    }]
                }]
            }
        }"#;
        let game: ActiveGame<TriviaPayload> = serde_json::from_str(json).unwrap();
        assert_eq!(game.coupon_code.as_deref(), Some("SAVE15"));
        assert_eq!(game.id, None);
        assert_eq!(game.data.id.as_deref(), Some("08-04-2025-08-11-2025"));
        let question = &game.data.categories[0].questions[0];
        assert_eq!(question.prompt, "How often should you wash a synthetic wig?");
        assert_eq!(question.correct_answer, "Every 6-8 wears");
        assert_eq!(question.value, 10);
    }

    #[test]
    fn missing_coupon_and_explanation_default_to_none() {
        let json = r#"{
            "data": {
                "id": null,
                "categories": [{
                    "title": "Styles",
                    "questions": [{
                        "value": 20,
                        "question": "Q",
                        "options": ["a", "b"],
                        "correctAnswer": "a"
                    }]
                }]
            }
        }"#;
        let game: ActiveGame<TriviaPayload> = serde_json::from_str(json).unwrap();
        assert_eq!(game.coupon_code, None);
        assert_eq!(game.data.categories[0].questions[0].explanation, None);
    }

    #[test]
    fn card_ids_accept_strings_and_numbers() {
        let payload: MatchPayload = serde_json::from_str(
            r#"{"cards": [
                {"id": 5, "title": "Luxe Wave", "image": "https://cdn/luxe.jpg"},
                {"id": "9", "title": "Silk Bob", "image": "https://cdn/silk.jpg"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(payload.cards[0].id, "5");
        assert_eq!(payload.cards[1].id, "9");
    }

    #[test]
    fn legacy_trivia_parses() {
        let legacy: LegacyTrivia = serde_json::from_str(
            r#"{"id": "04-21-2025", "categories": []}"#,
        )
        .unwrap();
        assert_eq!(legacy.id, "04-21-2025");
        assert!(legacy.categories.is_empty());
    }

    #[test]
    fn color_record_fills_missing_fields() {
        let record: ColorRecord = serde_json::from_str(
            r#"{"collection": "Naturals", "name": "Honey Blonde"}"#,
        )
        .unwrap();
        assert_eq!(record.name, "Honey Blonde");
        assert_eq!(record.brand, "");
        assert!(!record.rooted);
        assert!(record.image.is_empty());
        assert_eq!(record.video, None);
    }

    #[test]
    fn saved_progress_uses_camel_case_keys() {
        let progress = SavedProgress {
            saved_game_id: "08-04-2025-08-11-2025".to_owned(),
            saved_score: 40,
            saved_answered_questions: vec![SavedAnswer {
                category_index: 0,
                question_index: 1,
                selected_option: "Every 6-8 wears".to_owned(),
                correct: true,
            }],
            saved_at: DateTime::from_timestamp(1_754_400_000, 0).unwrap(),
        };
        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"savedGameId\""));
        assert!(json.contains("\"savedAnsweredQuestions\""));
        assert!(json.contains("\"categoryIndex\""));
        let back: SavedProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }

    #[test]
    fn urls_tolerate_trailing_slash() {
        assert_eq!(
            active_game_url("https://api.test/bosscrowns/", GameType::MatchGame),
            "https://api.test/bosscrowns/jeopardy/active?type=match-game"
        );
        assert_eq!(
            latest_game_url("https://api.test/bosscrowns"),
            "https://api.test/bosscrowns/jeopardy/latest"
        );
        assert_eq!(
            color_index_url("https://api.test/bosscrowns"),
            "https://api.test/bosscrowns/colorIndex"
        );
    }
}
