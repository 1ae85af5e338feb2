//! Maps an inbound event to exactly one handler.

use super::event::InboundEvent;

/// The handler selected for an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Start,
    Help,
    About,
    /// Completion prompt: command args, or the whole message for free text.
    Chat(String),
    /// Image-generation prompt.
    Image(String),
    Weather,
    News,
    Joke,
    /// Command token that matched nothing. The token is echoed back in the
    /// reply so the user sees what was not understood.
    Unrecognized(String),
}

/// Select the handler for an event. Free text with no command token is
/// always treated as a conversational prompt. Short aliases (`hlp`, `abt`,
/// `msg`, `img`, `wea`, `lol`) are kept for muscle memory.
pub fn route(event: &InboundEvent) -> Route {
    let Some(ref command) = event.command else {
        return Route::Chat(event.text.clone());
    };

    match command.as_str() {
        "start" => Route::Start,
        "help" | "hlp" => Route::Help,
        "about" | "abt" => Route::About,
        "chat" | "msg" => Route::Chat(event.text.clone()),
        "image" | "img" => Route::Image(event.text.clone()),
        "weather" | "wea" => Route::Weather,
        "news" => Route::News,
        "joke" | "lol" => Route::Joke,
        other => Route::Unrecognized(other.to_string()),
    }
}
