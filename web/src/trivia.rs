use crate::api;
use crate::utils::*;
use chrono::prelude::*;
use crowns_core as game;
use crowns_protocol as wire;
use gloo::timers::callback::Timeout;
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

/// The question modal lingers briefly after "Next" so the feedback does not
/// vanish mid-click.
const CLOSE_DELAY_MS: u32 = 500;
const TOAST_HIDE_MS: u32 = 2_000;

impl StorageKey for wire::SavedProgress {
    const KEY: &'static str = "crowns:trivia:v1";
}

#[derive(Debug)]
enum Content {
    Loading,
    Unavailable(String),
    Ready(game::TriviaEngine),
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Toast {
    success: bool,
    message: &'static str,
}

#[derive(Debug)]
pub(crate) enum Msg {
    Loaded(Result<game::TriviaDefinition, api::FetchError>),
    Pick(usize, usize),
    Choose(String),
    Submit,
    RequestClose,
    CloseQuestion,
    CopyCoupon,
    CopyFinished(bool),
    DismissToast,
    Reset,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct TriviaProps {
    pub api_base: String,
}

/// Rebuilds the session from a saved record, or starts fresh when the save
/// belongs to another board or no longer replays to the same state.
fn rebuild(definition: game::TriviaDefinition, saved: Option<wire::SavedProgress>) -> game::TriviaEngine {
    let Some(saved) = saved else {
        return game::TriviaEngine::new(definition);
    };
    if definition.id() != Some(saved.saved_game_id.as_str()) {
        log::debug!("Saved progress is for {:?}, starting fresh", saved.saved_game_id);
        return game::TriviaEngine::new(definition);
    }
    let records: Vec<game::AnsweredRecord> = saved
        .saved_answered_questions
        .iter()
        .map(game::AnsweredRecord::from)
        .collect();
    match game::TriviaEngine::restore(definition.clone(), game::TriviaConfig::default(), &records) {
        Ok(engine) if engine.score() == saved.saved_score => {
            log::debug!("Resumed {} answers saved at {}", records.len(), saved.saved_at);
            engine
        }
        Ok(engine) => {
            log::warn!(
                "Saved score {} does not match the replayed {}, starting fresh",
                saved.saved_score,
                engine.score()
            );
            game::TriviaEngine::new(definition)
        }
        Err(err) => {
            log::warn!("Could not resume the saved session: {}", err);
            game::TriviaEngine::new(definition)
        }
    }
}

/// What gets persisted for the current session: answers given mid-game on a
/// board that has an id, nothing otherwise. Writing `None` clears the slot,
/// so finished and reset sessions erase themselves.
fn progress_record(engine: &game::TriviaEngine, now: DateTime<Utc>) -> Option<wire::SavedProgress> {
    let id = engine.definition().id()?;
    if !engine.phase().is_in_progress() || engine.answered().is_empty() {
        return None;
    }
    Some(wire::SavedProgress {
        saved_game_id: id.to_owned(),
        saved_score: engine.score(),
        saved_answered_questions: engine.answered().iter().map(wire::SavedAnswer::from).collect(),
        saved_at: now,
    })
}

#[derive(Debug)]
pub(crate) struct TriviaView {
    content: Content,
    choice: Option<String>,
    toast: Option<Toast>,
    _close_delay: Option<Timeout>,
    _toast_delay: Option<Timeout>,
}

impl TriviaView {
    fn view_board(&self, ctx: &Context<Self>, engine: &game::TriviaEngine) -> Html {
        use Msg::*;

        let minimum = engine.config().minimum_score;
        let banner = if engine.phase().is_complete() {
            match engine.reward_code() {
                Some(code) => html! {
                    <div class="coupon">
                        <strong>{format!("Your Coupon Code: {}", code)}</strong>
                        <button onclick={ctx.link().callback(|_| CopyCoupon)}>{"Copy"}</button>
                    </div>
                },
                None => html! {
                    <div class="score-too-low">
                        <strong>{format!("Score too low! You need {}% to unlock the coupon code.", minimum)}</strong>
                        <button onclick={ctx.link().callback(|_| Reset)}>{"Reset Game"}</button>
                    </div>
                },
            }
        } else {
            Html::default()
        };

        html! {
            <>
                <p class="score">{format!("Score: {}% | Need {}% to unlock coupon", engine.score(), minimum)}</p>
                { banner }
                <div class="board">
                    {
                        for engine.definition().categories().iter().enumerate().map(|(c, category)| html! {
                            <div class="category">
                                <header>{ &category.title }</header>
                                {
                                    for category.questions.iter().enumerate().map(|(q, question)| {
                                        let answered = engine.is_answered(c, q);
                                        let onclick = ctx.link().callback(move |_| Pick(c, q));
                                        html! {
                                            <button
                                                class={classes!("value", answered.then_some("answered"))}
                                                disabled={answered}
                                                {onclick}
                                            >
                                                { question.value }
                                            </button>
                                        }
                                    })
                                }
                            </div>
                        })
                    }
                </div>
                { self.view_question(ctx, engine) }
            </>
        }
    }

    fn view_question(&self, ctx: &Context<Self>, engine: &game::TriviaEngine) -> Html {
        use Msg::*;

        let Some(question) = engine.open_question() else {
            return Html::default();
        };
        let submitted = match engine.selection() {
            game::Selection::Submitted { correct, .. } => Some(correct),
            _ => None,
        };

        let feedback = match submitted {
            Some(true) => html! {
                <>
                    <p class="feedback correct">{"Correct!"}</p>
                    {
                        match &question.explanation {
                            Some(explanation) => html! {
                                <p class="explanation">{format!("Explanation: {}", explanation)}</p>
                            },
                            None => Html::default(),
                        }
                    }
                </>
            },
            Some(false) => html! { <p class="feedback incorrect">{"Incorrect"}</p> },
            None => Html::default(),
        };

        let action = if submitted.is_none() {
            let disabled = self.choice.is_none();
            html! { <button onclick={ctx.link().callback(|_| Submit)} {disabled}>{"Submit"}</button> }
        } else {
            html! { <button onclick={ctx.link().callback(|_| RequestClose)}>{"Next"}</button> }
        };

        html! {
            <Modal>
                <div class="question-modal">
                    // Closing before submitting leaves the question available.
                    <button class="close" onclick={ctx.link().callback(|_| RequestClose)}>{"✕"}</button>
                    <h2>{format!("{}% Discount", question.value)}</h2>
                    <p>{ &question.prompt }</p>
                    <fieldset disabled={submitted.is_some()}>
                        {
                            for question.options.iter().map(|option| {
                                let checked = self.choice.as_deref() == Some(option.as_str());
                                let reveal = submitted.is_some() && *option == question.correct_answer;
                                let value = option.clone();
                                let onchange = ctx.link().callback(move |_: Event| Choose(value.clone()));
                                html! {
                                    <label class={classes!("option", reveal.then_some("correct-answer"))}>
                                        <input type="radio" name="answer" {checked} {onchange}/>
                                        { option }
                                    </label>
                                }
                            })
                        }
                    </fieldset>
                    { feedback }
                    <div class="actions">{ action }</div>
                </div>
            </Modal>
        }
    }

    fn view_toast(&self) -> Html {
        match &self.toast {
            Some(toast) => html! {
                <div class={classes!("toast", if toast.success { "success" } else { "error" })}>
                    { toast.message }
                </div>
            },
            None => Html::default(),
        }
    }

    fn save_progress(&self) {
        if let Content::Ready(engine) = &self.content {
            progress_record(engine, utc_now()).local_save();
        }
    }
}

impl Component for TriviaView {
    type Message = Msg;
    type Properties = TriviaProps;

    fn create(ctx: &Context<Self>) -> Self {
        let api_base = ctx.props().api_base.clone();
        ctx.link()
            .send_future(async move { Msg::Loaded(api::fetch_trivia(&api_base).await) });
        Self {
            content: Content::Loading,
            choice: None,
            toast: None,
            _close_delay: None,
            _toast_delay: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Loaded(Ok(definition)) => {
                let saved = LocalOrDefault::local_or_default();
                let mut engine = rebuild(definition, saved);
                if engine.phase().is_initial() {
                    engine.start().has_update();
                }
                self.content = Content::Ready(engine);
                true
            }
            Loaded(Err(err)) => {
                log::error!("Trivia load failed: {}", err);
                self.content = Content::Unavailable(err.to_string());
                true
            }
            Pick(category, question) => match &mut self.content {
                Content::Ready(engine) => {
                    log::debug!("open question: ({}, {})", category, question);
                    if engine.select(category, question).has_update() {
                        self.choice = None;
                        true
                    } else {
                        false
                    }
                }
                _ => false,
            },
            Choose(option) => match &self.content {
                Content::Ready(engine)
                    if matches!(engine.selection(), game::Selection::Picked(_)) =>
                {
                    self.choice = Some(option);
                    true
                }
                _ => false,
            },
            Submit => match (&mut self.content, &self.choice) {
                (Content::Ready(engine), Some(choice)) => {
                    log::debug!("submit answer: {:?}", choice);
                    engine.submit(choice).has_update()
                }
                _ => false,
            },
            RequestClose => {
                if let Content::Ready(engine) = &self.content {
                    if !engine.selection().is_idle() {
                        let link = ctx.link().clone();
                        self._close_delay = Some(Timeout::new(CLOSE_DELAY_MS, move || {
                            link.send_message(CloseQuestion)
                        }));
                    }
                }
                false
            }
            CloseQuestion => {
                self._close_delay = None;
                match &mut self.content {
                    Content::Ready(engine) => match engine.close() {
                        Ok(phase) => {
                            self.choice = None;
                            if phase.is_complete() {
                                log::info!("Board finished with score {}", engine.score());
                            }
                            true
                        }
                        Err(err) => {
                            log::warn!("Rejected move: {}", err);
                            false
                        }
                    },
                    _ => false,
                }
            }
            CopyCoupon => {
                if let Content::Ready(engine) = &self.content {
                    if let Some(code) = engine.reward_code() {
                        let code = code.to_owned();
                        ctx.link().send_future(async move {
                            let clipboard = gloo::utils::window().navigator().clipboard();
                            let copied = JsFuture::from(clipboard.write_text(&code)).await.is_ok();
                            CopyFinished(copied)
                        });
                    }
                }
                false
            }
            CopyFinished(copied) => {
                self.toast = Some(if copied {
                    Toast {
                        success: true,
                        message: "Coupon code copied to clipboard!",
                    }
                } else {
                    Toast {
                        success: false,
                        message: "Failed to copy coupon code.",
                    }
                });
                let link = ctx.link().clone();
                self._toast_delay = Some(Timeout::new(TOAST_HIDE_MS, move || {
                    link.send_message(DismissToast)
                }));
                true
            }
            DismissToast => {
                self._toast_delay = None;
                self.toast.take().is_some()
            }
            Reset => match &mut self.content {
                Content::Ready(engine) => {
                    engine.reset();
                    engine.start().has_update();
                    self.choice = None;
                    self.toast = None;
                    true
                }
                _ => false,
            },
        };

        self.save_progress();
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = match &self.content {
            Content::Loading => html! { <p class="loading">{"Loading..."}</p> },
            Content::Unavailable(reason) => html! { <p class="error">{format!("Error: {}", reason)}</p> },
            Content::Ready(engine) => self.view_board(ctx, engine),
        };

        html! {
            <div class="trivia">
                <h1>{"Crown Jeopardy"}</h1>
                { content }
                { self.view_toast() }
            </div>
        }
    }
}
