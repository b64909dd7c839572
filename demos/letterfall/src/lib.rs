use wasm_bindgen::prelude::*;
use letterfall_engine::*;

pub mod config;
pub mod font;
pub mod game;
pub mod letter;
pub mod physics;
pub mod picking;
pub mod replay;
pub mod share;
pub mod text_sync;

use game::Letterfall;

letterfall_web::export_game!(Letterfall, "letterfall");

/// Intro overlay dismissed. Call from the click handler so audio may start.
#[wasm_bindgen]
pub fn game_start() {
    game_resume_audio();
    let text = letterfall_web::page::query_param(game::TEXT_PARAM);
    with_runner(|r| {
        if let Some(value) = text {
            r.push_input(InputEvent::QueryParam {
                key: game::TEXT_PARAM.to_string(),
                value,
            });
        }
        r.push_input(InputEvent::Custom { kind: game::custom::START, a: 0.0, b: 0.0, c: 0.0 });
    });
}

/// Current text, for mirroring into the text control.
#[wasm_bindgen]
pub fn game_text() -> String {
    with_runner(|r| r.game().text().to_string())
}

/// Link that recreates the current text, if the page URL is readable.
#[wasm_bindgen]
pub fn game_share_url() -> Option<String> {
    let text = game_text();
    letterfall_web::page::share_url(game::TEXT_PARAM, &text)
}

#[wasm_bindgen]
pub fn game_is_replaying() -> bool {
    with_runner(|r| r.game().is_replaying())
}
