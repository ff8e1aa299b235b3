use crowns_core::{ColorSwatch, ContentError, MatchDefinition, TriviaDefinition};
use crowns_protocol as wire;
use gloo::net::http::Request;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum FetchError {
    #[error("No game is currently running")]
    NoActiveGame,
    #[error("Server answered with status {0}")]
    Status(u16),
    #[error("Request failed: {0}")]
    Http(gloo::net::Error),
    #[error("Unreadable response: {0}")]
    Decode(serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ContentError),
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    log::debug!("GET {}", url);
    let response = Request::get(url).send().await.map_err(FetchError::Http)?;
    if response.status() == 404 {
        return Err(FetchError::NoActiveGame);
    }
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    response.json().await.map_err(|err| match err {
        gloo::net::Error::SerdeError(err) => FetchError::Decode(err),
        err => FetchError::Http(err),
    })
}

/// Loads the active trivia round, falling back to the newest archived board
/// when no round is scheduled.
pub(crate) async fn fetch_trivia(base: &str) -> Result<TriviaDefinition, FetchError> {
    let url = wire::active_game_url(base, wire::GameType::Jeopardy);
    match get_json::<wire::ActiveGame<wire::TriviaPayload>>(&url).await {
        Ok(game) => Ok(TriviaDefinition::from_active(game)?),
        Err(FetchError::NoActiveGame) => {
            log::debug!("No active trivia round, trying the archive");
            match get_json::<wire::LegacyTrivia>(&wire::latest_game_url(base)).await {
                Ok(legacy) => Ok(TriviaDefinition::from_legacy(legacy)?),
                Err(err) => {
                    log::warn!("Archive lookup failed: {}", err);
                    Err(FetchError::NoActiveGame)
                }
            }
        }
        Err(err) => Err(err),
    }
}

pub(crate) async fn fetch_match_game(base: &str) -> Result<MatchDefinition, FetchError> {
    let url = wire::active_game_url(base, wire::GameType::MatchGame);
    let game: wire::ActiveGame<wire::MatchPayload> = get_json(&url).await?;
    Ok(MatchDefinition::from_active(game)?)
}

pub(crate) async fn fetch_color_index(base: &str) -> Result<Vec<ColorSwatch>, FetchError> {
    let records: Vec<wire::ColorRecord> = get_json(&wire::color_index_url(base)).await?;
    Ok(records.into_iter().map(ColorSwatch::from).collect())
}
