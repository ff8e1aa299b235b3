use crate::catalog::CatalogView;
use crate::match_game::MatchGameView;
use crate::trivia::TriviaView;
use yew::prelude::*;

/// Pages served by the app, picked from the location path at startup.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Route {
    MatchGame,
    Trivia,
    Colors,
}

impl Route {
    /// `/match-game` and every unknown path land on the match game, the
    /// promotion the shop links to.
    pub(crate) fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/jeopardy" => Self::Trivia,
            "/colors" => Self::Colors,
            _ => Self::MatchGame,
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    pub route: Route,
    pub api_base: String,
}

#[function_component]
pub(crate) fn AppView(props: &AppProps) -> Html {
    let api_base = props.api_base.clone();
    match props.route {
        Route::MatchGame => html! { <MatchGameView {api_base}/> },
        Route::Trivia => html! { <TriviaView {api_base}/> },
        Route::Colors => html! { <CatalogView {api_base}/> },
    }
}
