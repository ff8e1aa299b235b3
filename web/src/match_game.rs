use crate::api;
use crate::utils::*;
use crowns_core as game;
use game::LayoutGenerator;
use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;

/// A matched pair stays visible briefly before it leaves the board.
const RESOLVE_DELAY_MS: u32 = 1_500;
const TOAST_HIDE_MS: u32 = 2_000;

#[derive(Debug)]
enum Content {
    Loading,
    Unavailable(String),
    Ready(game::MatchEngine),
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Toast {
    success: bool,
    message: &'static str,
}

#[derive(Debug)]
pub(crate) enum Msg {
    Loaded(Result<game::MatchDefinition, api::FetchError>),
    StartGame,
    PickTerm(String),
    PickImage(String),
    ClearResolved,
    Tick,
    DismissToast,
    PlayAgain,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct MatchGameProps {
    pub api_base: String,
}

fn format_elapsed(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// After a wrong guess the name card stays selected for the next try; only
/// the submitted image pick is put away.
fn clear_mismatch(engine: &mut game::MatchEngine) {
    if !matches!(
        engine.selection(),
        game::MatchSelection::Submitted { matched: false, .. }
    ) {
        return;
    }
    let term = engine.selection().term().map(str::to_owned);
    engine.close().has_update();
    if let Some(term) = term {
        engine.select_term(&term).has_update();
    }
}

#[derive(Debug)]
pub(crate) struct MatchGameView {
    content: Content,
    toast: Option<Toast>,
    prev_time: u32,
    timer: Option<Interval>,
    _resolve_delay: Option<Timeout>,
    _toast_delay: Option<Timeout>,
}

impl MatchGameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1_000, move || link.send_message(Msg::Tick))
    }

    fn show_toast(&mut self, ctx: &Context<Self>, success: bool, message: &'static str) {
        self.toast = Some(Toast { success, message });
        let link = ctx.link().clone();
        self._toast_delay = Some(Timeout::new(TOAST_HIDE_MS, move || {
            link.send_message(Msg::DismissToast)
        }));
    }

    fn view_game(&self, ctx: &Context<Self>, engine: &game::MatchEngine) -> Html {
        use Msg::*;

        let start_modal = engine.phase().is_initial().then(|| {
            html! {
                <Modal>
                    <div class="start-modal">
                        <h2>{"Welcome to Crown Match Game!"}</h2>
                        <p>{"Match the wig names to their images to unlock a coupon code!"}</p>
                        <ul>
                            <li>{"Select a wig name first."}</li>
                            <li>{"Then select the matching wig image."}</li>
                            <li>{"Match all pairs to win!"}</li>
                        </ul>
                        <button onclick={ctx.link().callback(|_| StartGame)}>{"Start Game"}</button>
                    </div>
                </Modal>
            }
        });

        let selection = engine.selection();
        let term_picked = selection.term().is_some();

        let names: Html = if engine.remaining_pairs() == 0 && engine.phase().is_complete() {
            html! { <p class="all-done">{"All matches completed! Great job!"}</p> }
        } else {
            html! {
                <div class="cards">
                    {
                        for engine.term_cards().map(|card| {
                            let selected = selection.term() == Some(card.id.as_str());
                            let id = card.id.clone();
                            let onclick = ctx.link().callback(move |_| PickTerm(id.clone()));
                            html! {
                                <button class={classes!("card", "name", selected.then_some("selected"))} {onclick}>
                                    { &card.title }
                                </button>
                            }
                        })
                    }
                </div>
            }
        };

        let images = engine.image_cards().map(|card| {
            let feedback = match selection {
                game::MatchSelection::Submitted { image, matched, .. } if image == &card.id => {
                    Some(if *matched { "matched" } else { "mismatched" })
                }
                _ => None,
            };
            let id = card.id.clone();
            let onclick = ctx.link().callback(move |_| PickImage(id.clone()));
            html! {
                <button
                    class={classes!("card", "image", feedback, (!term_picked).then_some("inactive"))}
                    disabled={!term_picked}
                    {onclick}
                >
                    <img src={card.image.clone()} alt={card.title.clone()}/>
                </button>
            }
        });

        let stats = engine.phase().is_in_progress().then(|| {
            html! {
                <aside class="stats">
                    <h3>{"Game Stats"}</h3>
                    <p>{format!("Time: {}", format_elapsed(engine.elapsed_secs()))}</p>
                    <p>{format!("Tries: {}", engine.tries())}</p>
                </aside>
            }
        });

        let end_modal = engine.phase().is_complete().then(|| {
            let coupon = engine.reward_code().map(|code| {
                html! {
                    <p class="coupon"><strong>{format!("Your Coupon Code: {}", code)}</strong></p>
                }
            });
            html! {
                <Modal>
                    <div class="end-modal">
                        <h2>{"Game Over!"}</h2>
                        <p>{format!("Time Elapsed: {} minutes", format_elapsed(engine.elapsed_secs()))}</p>
                        <p>{format!("Tries: {}", engine.tries())}</p>
                        { coupon }
                        <button onclick={ctx.link().callback(|_| PlayAgain)}>{"Play Again"}</button>
                    </div>
                </Modal>
            }
        });

        html! {
            <>
                { start_modal }
                <section class="names">
                    <h2>{"Wig Names"}</h2>
                    { names }
                </section>
                <section class="images">
                    <h2>{"Wig Images"}</h2>
                    <div class="cards">{ for images }</div>
                </section>
                { stats }
                { end_modal }
            </>
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
}

impl Component for MatchGameView {
    type Message = Msg;
    type Properties = MatchGameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let api_base = ctx.props().api_base.clone();
        ctx.link()
            .send_future(async move { Msg::Loaded(api::fetch_match_game(&api_base).await) });
        Self {
            content: Content::Loading,
            toast: None,
            prev_time: 0,
            timer: None,
            _resolve_delay: None,
            _toast_delay: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Loaded(Ok(definition)) => {
                let layout = game::RandomLayoutGenerator::new(js_random_seed())
                    .generate(&definition, game::MatchConfig::default());
                self.content = Content::Ready(game::MatchEngine::new(definition, layout));
                true
            }
            Loaded(Err(err)) => {
                log::error!("Match game load failed: {}", err);
                self.content = Content::Unavailable(err.to_string());
                true
            }
            StartGame => match &mut self.content {
                Content::Ready(engine) => {
                    if engine.start().has_update() {
                        self.timer = Some(Self::create_timer(ctx));
                        true
                    } else {
                        false
                    }
                }
                _ => false,
            },
            PickTerm(id) => match &mut self.content {
                Content::Ready(engine) => {
                    log::debug!("pick name: {}", id);
                    if matches!(
                        engine.selection(),
                        game::MatchSelection::Submitted { matched: true, .. }
                    ) {
                        // the matched pair is still resolving
                        false
                    } else {
                        clear_mismatch(engine);
                        self.toast = None;
                        engine.select_term(&id).has_update()
                    }
                }
                _ => false,
            },
            PickImage(id) => match &mut self.content {
                Content::Ready(engine) => {
                    log::debug!("pick image: {}", id);
                    if matches!(
                        engine.selection(),
                        game::MatchSelection::Submitted { matched: true, .. }
                    ) {
                        false
                    } else {
                        clear_mismatch(engine);
                        match engine.select_match(&id) {
                            Ok(outcome) => {
                                if outcome.is_match() {
                                    self.show_toast(ctx, true, "Correct match!");
                                    let link = ctx.link().clone();
                                    self._resolve_delay =
                                        Some(Timeout::new(RESOLVE_DELAY_MS, move || {
                                            link.send_message(ClearResolved)
                                        }));
                                } else {
                                    self.show_toast(ctx, false, "Incorrect match. Try again.");
                                }
                                true
                            }
                            Err(err) => {
                                log::warn!("Rejected move: {}", err);
                                false
                            }
                        }
                    }
                }
                _ => false,
            },
            ClearResolved => {
                self._resolve_delay = None;
                match &mut self.content {
                    Content::Ready(engine) => match engine.close() {
                        Ok(phase) => {
                            self.toast = None;
                            if phase.is_complete() {
                                log::info!(
                                    "Board cleared in {} tries, {}s",
                                    engine.tries(),
                                    engine.elapsed_secs()
                                );
                                self.timer = None;
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
            Tick => match &mut self.content {
                Content::Ready(engine) => {
                    engine.tick();
                    let time = engine.elapsed_secs();
                    if self.prev_time != time {
                        self.prev_time = time;
                        true
                    } else {
                        false
                    }
                }
                _ => false,
            },
            DismissToast => {
                self._toast_delay = None;
                if let Content::Ready(engine) = &mut self.content {
                    clear_mismatch(engine);
                }
                self.toast.take().is_some()
            }
            PlayAgain => match &mut self.content {
                Content::Ready(engine) => {
                    engine.reset();
                    if engine.start().has_update() {
                        self.prev_time = 0;
                        self.toast = None;
                        self.timer = Some(Self::create_timer(ctx));
                        true
                    } else {
                        false
                    }
                }
                _ => false,
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = match &self.content {
            Content::Loading => html! { <p class="loading">{"Loading..."}</p> },
            Content::Unavailable(reason) => html! {
                <p class="error">{format!("Failed to load Match game: {}", reason)}</p>
            },
            Content::Ready(engine) => self.view_game(ctx, engine),
        };

        html! {
            <div class="match-game">
                { content }
                { self.view_toast() }
            </div>
        }
    }
}
