use shortener_core::{Phase, WorkflowView};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Error,
}

/// Output produced from a view; the terminal module decides how it looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    Line(String),
    Status { text: String, severity: Severity },
}

#[allow(clippy::vec_init_then_push)]
pub fn render(view: &WorkflowView) -> Vec<ScreenCommand> {
    let mut cmds = Vec::new();

    if view.phase == Phase::Loading {
        let line = match view.last_request_id {
            Some(id) => format!("Shortening… {} (request {id})", view.input),
            None => format!("Shortening… {}", view.input),
        };
        cmds.push(ScreenCommand::Line(line));
    }

    if let Some(text) = &view.status_message {
        let severity = if view.is_error {
            Severity::Error
        } else {
            Severity::Information
        };
        cmds.push(ScreenCommand::Status {
            text: text.clone(),
            severity,
        });
    }

    match &view.short_url {
        Some(short_url) if view.actions_enabled => {
            cmds.push(ScreenCommand::Line(format!("Short URL: {short_url}")));
            cmds.push(ScreenCommand::Line(actions_hint()));
        }
        _ if view.phase == Phase::Idle && view.status_message.is_none() => {
            cmds.push(ScreenCommand::Line(READY_LABEL.to_string()));
        }
        _ => {}
    }

    cmds
}

fn actions_hint() -> String {
    format!("Actions: {}", [CMD_COPY, CMD_MAIL, CMD_OPEN, CMD_SHARE].join(" "))
}
