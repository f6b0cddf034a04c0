use crate::{
    is_well_formed_uri, Effect, FailureReason, Msg, ShortenOutcome, WorkflowState, COPIED_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WorkflowState, msg: Msg) -> (WorkflowState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::ShortenClicked => {
            if state.input().trim().is_empty() {
                // Never reaches the network, so there is no Loading phase.
                let message = FailureReason::InvalidInput.default_message().to_string();
                let generation = state.enter_failed(message);
                vec![schedule_clear(&state, generation)]
            } else {
                let (request_id, long_url) = state.begin_request();
                vec![Effect::Shorten {
                    request_id,
                    long_url,
                    format: state.config().format,
                }]
            }
        }
        Msg::ShortenCompleted {
            request_id,
            outcome,
        } => {
            if !state.accepts(request_id) {
                return (state, Vec::new());
            }
            state.complete_request(request_id);
            match outcome {
                ShortenOutcome::Success { short_url } => {
                    let generation = state.enter_succeeded(short_url.clone());
                    let mut effects = Vec::with_capacity(2);
                    if state.config().copy_on_success {
                        effects.push(Effect::CopyToClipboard { text: short_url });
                    }
                    effects.push(schedule_clear(&state, generation));
                    effects
                }
                ShortenOutcome::Failure { reason, message } => {
                    let message = if message.trim().is_empty() {
                        reason.default_message().to_string()
                    } else {
                        message
                    };
                    let generation = state.enter_failed(message);
                    vec![schedule_clear(&state, generation)]
                }
            }
        }
        Msg::StatusClearDue { generation } => {
            state.clear_status_if_current(generation);
            Vec::new()
        }
        Msg::ClearClicked => {
            state.reset();
            Vec::new()
        }
        Msg::CopyClicked => match state.short_url().map(ToOwned::to_owned) {
            Some(text) => {
                // The transient copy notice gets its own clear generation.
                let generation = state.show_status(COPIED_MESSAGE.to_string(), false);
                vec![
                    Effect::CopyToClipboard { text },
                    schedule_clear(&state, generation),
                ]
            }
            None => Vec::new(),
        },
        Msg::MailClicked => state
            .short_url()
            .map(|short_url| {
                vec![Effect::ComposeMail {
                    short_url: short_url.to_string(),
                }]
            })
            .unwrap_or_default(),
        Msg::OpenInBrowserClicked => state
            .short_url()
            .filter(|url| is_well_formed_uri(url))
            .map(|url| {
                vec![Effect::OpenInBrowser {
                    url: url.to_string(),
                }]
            })
            .unwrap_or_default(),
        Msg::ShareClicked => state
            .short_url()
            .map(|short_url| {
                vec![Effect::SystemShare {
                    items: vec![short_url.to_string()],
                }]
            })
            .unwrap_or_default(),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn schedule_clear(state: &WorkflowState, generation: u64) -> Effect {
    Effect::ScheduleStatusClear {
        generation,
        after: state.config().status_display,
    }
}
