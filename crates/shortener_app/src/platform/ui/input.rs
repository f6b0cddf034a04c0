use shortener_core::Msg;

use super::constants::*;

/// What one line typed into the window asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
}

/// Lines starting with `:` are commands; anything else is a URL to shorten.
///
/// A blank line still dispatches `ShortenClicked` so the empty-input error is shown.
pub fn parse_line(line: &str) -> InputAction {
    let trimmed = line.trim();
    if !trimmed.starts_with(':') {
        return InputAction::Dispatch(vec![
            Msg::InputChanged(trimmed.to_string()),
            Msg::ShortenClicked,
        ]);
    }

    let msg = match trimmed {
        CMD_COPY => Msg::CopyClicked,
        CMD_MAIL => Msg::MailClicked,
        CMD_OPEN => Msg::OpenInBrowserClicked,
        CMD_SHARE => Msg::ShareClicked,
        CMD_CLEAR => Msg::ClearClicked,
        CMD_QUIT => return InputAction::Quit,
        _ => return InputAction::Help,
    };
    InputAction::Dispatch(vec![msg])
}
