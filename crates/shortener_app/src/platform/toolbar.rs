//! Browser toolbar handler: shortens one page URL and prints the popover text.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::process::ExitCode;

use engine_logging::{engine_debug, engine_info};
use shortener_core::{
    Msg, Phase, WorkflowConfig, WorkflowView, COPIED_MESSAGE, SUCCESS_COPIED_MESSAGE,
};

use super::app::{Surface, UiEvent};
use super::cli::ToolbarAction;
use super::config::AppConfig;

pub(crate) const NO_URL_HEADLINE: &str = "No short URL yet";
pub(crate) const NO_URL_HINT: &str = "Click the toolbar button to shorten the current page";
pub(crate) const LOADING_HEADLINE: &str = "Shortening…";
pub(crate) const ERROR_HEADLINE: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PopoverText {
    pub headline: String,
    pub status: String,
}

pub(crate) fn popover_text(view: &WorkflowView) -> PopoverText {
    let (headline, status) = match view.phase {
        Phase::Loading => (LOADING_HEADLINE.to_string(), String::new()),
        Phase::Failed => (
            ERROR_HEADLINE.to_string(),
            format!(
                "Shortening failed: {}",
                view.status_message.as_deref().unwrap_or_default()
            ),
        ),
        Phase::Succeeded => {
            let status = match view.status_message.as_deref() {
                Some(SUCCESS_COPIED_MESSAGE) | None => COPIED_MESSAGE.to_string(),
                Some(other) => other.to_string(),
            };
            (view.short_url.clone().unwrap_or_default(), status)
        }
        Phase::Idle => match &view.short_url {
            Some(short_url) => (
                short_url.clone(),
                view.status_message.clone().unwrap_or_default(),
            ),
            None => (NO_URL_HEADLINE.to_string(), NO_URL_HINT.to_string()),
        },
    };
    PopoverText { headline, status }
}

/// Tracks what has been shown and when the handler is done.
#[derive(Debug, Default)]
struct PopoverSession {
    shown: Option<PopoverText>,
    outcome: Option<bool>,
}

impl PopoverSession {
    /// Returns the text to print, if it changed since the last call.
    fn observe(&mut self, view: &WorkflowView) -> Option<PopoverText> {
        match view.phase {
            Phase::Succeeded => self.outcome = Some(true),
            Phase::Failed => self.outcome = Some(false),
            _ => {}
        }
        // The cleared status after the outcome is not shown.
        if self.is_finished(view.phase) {
            return None;
        }
        let text = popover_text(view);
        if self.shown.as_ref() == Some(&text) {
            return None;
        }
        self.shown = Some(text.clone());
        Some(text)
    }

    fn is_finished(&self, phase: Phase) -> bool {
        self.outcome.is_some() && phase == Phase::Idle
    }
}

pub fn run_toolbar(
    config: &AppConfig,
    page_url: &str,
    follow_ups: &[ToolbarAction],
) -> anyhow::Result<ExitCode> {
    let workflow = config.workflow(WorkflowConfig::toolbar());
    let mut surface = Surface::new(workflow, config.shortener_settings()?)?;

    engine_info!("Toolbar shortening page URL of {} bytes", page_url.len());
    let outcome = drive(&mut surface, page_url, follow_ups, &mut io::stdout().lock())?;

    engine_debug!("Toolbar finished with outcome {:?}", outcome);
    Ok(match outcome {
        Some(true) => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    })
}

fn follow_up_msg(action: ToolbarAction) -> Msg {
    match action {
        ToolbarAction::Mail => Msg::MailClicked,
        ToolbarAction::Share => Msg::ShareClicked,
    }
}

/// Runs one toolbar click to completion and returns whether it succeeded.
///
/// `follow_ups` are pressed once, right after the short URL arrives. The loop
/// then waits for the status window so the clipboard owner outlives the copy.
fn drive(
    surface: &mut Surface,
    page_url: &str,
    follow_ups: &[ToolbarAction],
    out: &mut impl Write,
) -> io::Result<Option<bool>> {
    let mut session = PopoverSession::default();
    // The page URL arrives with the click, so the empty popover is never shown.
    surface.dispatch(Msg::InputChanged(page_url.to_string()));
    let mut queue = VecDeque::from([Msg::ShortenClicked]);
    let mut follow_ups_sent = false;

    loop {
        while let Some(msg) = queue.pop_front() {
            if let Some(view) = surface.dispatch(msg) {
                print_popover(out, session.observe(&view))?;
            }
        }
        if !follow_ups_sent && surface.phase() == Phase::Succeeded {
            follow_ups_sent = true;
            queue.extend(follow_ups.iter().copied().map(follow_up_msg));
            continue;
        }
        if session.is_finished(surface.phase()) {
            break;
        }
        match surface.next_event() {
            Some(UiEvent::Dispatch(msg)) => queue.push_back(msg),
            Some(_) => {}
            None => break,
        }
    }

    Ok(session.outcome)
}

fn print_popover(out: &mut impl Write, text: Option<PopoverText>) -> io::Result<()> {
    let Some(text) = text else {
        return Ok(());
    };
    writeln!(out, "{}", text.headline)?;
    if !text.status.is_empty() {
        writeln!(out, "{}", text.status)?;
    }
    out.flush()
}
