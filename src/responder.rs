//! Scripted reactions to incoming room messages.

use std::sync::LazyLock;

use regex::Regex;

/// Greetings the bot answers: "hello...", exactly "hi", "hallo...".
static GREETING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:hello|hi$|hallo)").unwrap());

/// Trigger character directly followed by "elbe", nothing after. Trailing
/// text ("!elbe now") does not trigger.
static LEVEL_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[+?!/\\]elbe$").unwrap());

/// What to do about one room message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send this text back into the room.
    Reply(String),
    /// Look up the current Elbe level and report it.
    FetchLevel,
}

/// Maps one room message to at most one action. Rules are checked in order
/// and only the first match fires; no state is kept between calls.
pub fn respond(nick: &str, text: &str) -> Option<Action> {
    if GREETING.is_match(text) {
        Some(Action::Reply(format!("{nick}: Hi!")))
    } else if LEVEL_TRIGGER.is_match(text) {
        Some(Action::FetchLevel)
    } else {
        None
    }
}
