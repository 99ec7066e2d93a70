use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod theme;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a layout seed instead of a random one
    #[arg(short, long)]
    seed: Option<u64>,
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
    log::debug!("seed: {:?}", args.seed);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, game::GameProps { seed: args.seed })
        .render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_hash_parses_into_args() {
        let args = Args::try_parse_from("#--seed=7&-vv".split(['#', '&'])).unwrap();

        assert_eq!(args.seed, Some(7));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn empty_hash_falls_back_to_defaults() {
        let args = Args::try_parse_from("".split(['#', '&'])).unwrap();

        assert_eq!(args.seed, None);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }
}
