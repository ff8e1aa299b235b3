use clap::Parser;
use wasm_bindgen::prelude::*;

mod api;
mod app;
mod catalog;
mod match_game;
mod trivia;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Override the content API base URL
    #[arg(short, long)]
    api_base: Option<String>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    let api_base = args
        .api_base
        .unwrap_or_else(|| crowns_protocol::DEFAULT_API_BASE.to_string());

    let path = window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string());
    let route = app::Route::from_path(&path);
    log::debug!("route: {:?}, api base: {}", route, api_base);

    let root = document()
        .get_element_by_id("app")
        .expect("Could not find id=\"app\" element");

    log::debug!("App started");
    yew::Renderer::<app::AppView>::with_root_and_props(root, app::AppProps { route, api_base })
        .render();
}
