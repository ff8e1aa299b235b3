use crate::api;
use crate::utils::Modal;
use crowns_core as game;
use std::collections::HashSet;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::prelude::*;

/// Shown in place of a swatch when the feed carries no pictures.
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200x200?text=Color+Swatch";

/// Sentinel option rendered at the top of both selects.
const ALL: &str = "All";

#[derive(Debug)]
enum Content {
    Loading,
    Unavailable(String),
    Ready(Vec<game::ColorSwatch>),
}

#[derive(Debug)]
pub(crate) enum Msg {
    Loaded(Result<Vec<game::ColorSwatch>, api::FetchError>),
    SetQuery(String),
    SetCollection(String),
    SetBrand(String),
    ToggleVideo(String),
    OpenImages(Vec<String>),
    CloseImages,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct CatalogProps {
    pub api_base: String,
}

fn parse_choice(value: String) -> Option<String> {
    (value != ALL).then_some(value)
}

/// Videos are toggled per swatch; colors the feed shipped without an id
/// fall back to their name.
fn video_key(swatch: &game::ColorSwatch) -> String {
    swatch.id.clone().unwrap_or_else(|| swatch.name.clone())
}

#[derive(Debug)]
pub(crate) struct CatalogView {
    content: Content,
    filter: game::CatalogFilter,
    playing: HashSet<String>,
    fullscreen: Option<Vec<String>>,
}

impl CatalogView {
    fn view_filters(&self, ctx: &Context<Self>, swatches: &[game::ColorSwatch]) -> Html {
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetQuery(input.value())
        });
        let on_collection = ctx.link().callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::SetCollection(select.value())
        });
        let on_brand = ctx.link().callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::SetBrand(select.value())
        });

        html! {
            <div class="filters">
                <input
                    type="text"
                    placeholder="Search by Collection, Name, Description, or Brand"
                    value={self.filter.query.clone()}
                    {oninput}
                />
                <label>
                    {"Collection"}
                    <select onchange={on_collection}>
                        { Self::view_options(&game::collections(swatches), self.filter.collection.as_deref()) }
                    </select>
                </label>
                <label>
                    {"Brand"}
                    <select onchange={on_brand}>
                        { Self::view_options(&game::brands(swatches), self.filter.brand.as_deref()) }
                    </select>
                </label>
            </div>
        }
    }

    fn view_options(values: &[String], current: Option<&str>) -> Html {
        let rest = values.iter().map(|value| {
            html! {
                <option value={value.clone()} selected={current == Some(value.as_str())}>
                    { value }
                </option>
            }
        });
        html! {
            <>
                <option value={ALL} selected={current.is_none()}>{ALL}</option>
                { for rest }
            </>
        }
    }

    fn view_swatch(&self, ctx: &Context<Self>, swatch: &game::ColorSwatch) -> Html {
        let images = if swatch.images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_owned()]
        } else {
            swatch.images.clone()
        };
        let gallery = images.iter().enumerate().map(|(index, image)| {
            let all = images.clone();
            let onclick = ctx.link().callback(move |_| Msg::OpenImages(all.clone()));
            html! {
                <img src={image.clone()} alt={format!("{} {}", swatch.name, index + 1)} {onclick}/>
            }
        });

        let rooted = if swatch.rooted { "Rooted" } else { "Unrooted" };
        let highlighted = if swatch.highlighted {
            "Highlighted"
        } else {
            "No Highlights"
        };
        let code = swatch.code.as_deref().unwrap_or("N/A");

        let video = swatch.video.as_deref().and_then(game::youtube_id).map(|id| {
            let key = video_key(swatch);
            let playing = self.playing.contains(&key);
            let onclick = ctx.link().callback(move |_| Msg::ToggleVideo(key.clone()));
            let player = playing.then(|| {
                html! {
                    <iframe
                        src={format!("https://www.youtube.com/embed/{}", id)}
                        title={swatch.name.clone()}
                        allowfullscreen={true}
                    />
                }
            });
            html! {
                <div class="video">
                    <button class="chip" {onclick}>{"Watch Video"}</button>
                    { player }
                </div>
            }
        });

        html! {
            <article class="swatch">
                <div class="gallery">{ for gallery }</div>
                <h3>{ &swatch.name }</h3>
                <p>{ &swatch.description }</p>
                <div class="chips">
                    <span class="chip">{format!("Brand: {}", swatch.brand)}</span>
                    <span class="chip">{format!("Tone: {}", swatch.tone)}</span>
                    <span class="chip">{ rooted }</span>
                    <span class="chip">{ highlighted }</span>
                </div>
                <p class="code">{format!("Code: {}", code)}</p>
                { video }
            </article>
        }
    }

    fn view_catalog(&self, ctx: &Context<Self>, swatches: &[game::ColorSwatch]) -> Html {
        let groups = game::group_by_collection(swatches, &self.filter);

        let body: Html = if groups.is_empty() {
            html! { <p class="empty">{"No colors match your search or filter criteria."}</p> }
        } else {
            groups
                .iter()
                .map(|(collection, members)| {
                    html! {
                        <section class="collection">
                            <h2>{ collection }</h2>
                            <div class="swatches">
                                { for members.iter().map(|swatch| self.view_swatch(ctx, swatch)) }
                            </div>
                        </section>
                    }
                })
                .collect()
        };

        html! {
            <>
                { self.view_filters(ctx, swatches) }
                { body }
            </>
        }
    }

    fn view_fullscreen(&self, ctx: &Context<Self>) -> Html {
        match &self.fullscreen {
            Some(images) => html! {
                <Modal>
                    <div class="image-modal">
                        <button class="close" onclick={ctx.link().callback(|_| Msg::CloseImages)}>
                            {"✕"}
                        </button>
                        {
                            for images.iter().enumerate().map(|(index, image)| html! {
                                <img src={image.clone()} alt={format!("Selected color {}", index + 1)}/>
                            })
                        }
                    </div>
                </Modal>
            },
            None => Html::default(),
        }
    }
}

impl Component for CatalogView {
    type Message = Msg;
    type Properties = CatalogProps;

    fn create(ctx: &Context<Self>) -> Self {
        let api_base = ctx.props().api_base.clone();
        ctx.link()
            .send_future(async move { Msg::Loaded(api::fetch_color_index(&api_base).await) });
        Self {
            content: Content::Loading,
            filter: game::CatalogFilter::default(),
            playing: HashSet::new(),
            fullscreen: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(swatches)) => {
                log::debug!("Loaded {} colors", swatches.len());
                self.content = Content::Ready(swatches);
                true
            }
            Msg::Loaded(Err(err)) => {
                log::error!("Color index load failed: {}", err);
                self.content = Content::Unavailable(err.to_string());
                true
            }
            Msg::SetQuery(query) => {
                self.filter.query = query;
                true
            }
            Msg::SetCollection(value) => {
                self.filter.collection = parse_choice(value);
                true
            }
            Msg::SetBrand(value) => {
                self.filter.brand = parse_choice(value);
                true
            }
            Msg::ToggleVideo(key) => {
                if !self.playing.remove(&key) {
                    self.playing.insert(key);
                }
                true
            }
            Msg::OpenImages(images) => {
                self.fullscreen = Some(images);
                true
            }
            Msg::CloseImages => self.fullscreen.take().is_some(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = match &self.content {
            Content::Loading => html! { <p class="loading">{"Loading colors..."}</p> },
            Content::Unavailable(reason) => html! {
                <p class="error">{format!("Error: {}", reason)}</p>
            },
            Content::Ready(swatches) => self.view_catalog(ctx, swatches),
        };

        html! {
            <div class="color-index">
                <h1>{"Boss Crowns Color Index"}</h1>
                { content }
                { self.view_fullscreen(ctx) }
            </div>
        }
    }
}
