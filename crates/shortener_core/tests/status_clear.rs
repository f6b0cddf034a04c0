use shortener_core::{update, Effect, Msg, Phase, ShortenOutcome, WorkflowState, STATUS_DISPLAY};

fn scheduled_generation(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScheduleStatusClear { generation, after } => {
                assert_eq!(*after, STATUS_DISPLAY);
                Some(*generation)
            }
            _ => None,
        })
        .expect("status clear scheduled")
}

fn start(state: WorkflowState, input: &str) -> WorkflowState {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    let (state, _) = update(state, Msg::ShortenClicked);
    state
}

#[test]
fn status_clears_after_display_window_and_keeps_short_url() {
    let state = start(WorkflowState::new(), "https://example.com");
    let (state, effects) = update(
        state,
        Msg::ShortenCompleted {
            request_id: 1,
            outcome: ShortenOutcome::Success {
                short_url: "https://is.gd/abc".to_string(),
            },
        },
    );
    let generation = scheduled_generation(&effects);

    // Simulated clock: the timer elapses.
    let (mut state, effects) = update(state, Msg::StatusClearDue { generation });
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.status_message, None);
    assert!(!view.is_error);
    assert_eq!(view.short_url.as_deref(), Some("https://is.gd/abc"));
    assert!(state.consume_dirty());
}

#[test]
fn error_status_clears_after_display_window() {
    let (state, effects) = update(WorkflowState::new(), Msg::ShortenClicked);
    let generation = scheduled_generation(&effects);
    assert_eq!(state.phase(), Phase::Failed);

    let (state, _) = update(state, Msg::StatusClearDue { generation });

    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.status_message(), None);
    assert!(!state.is_error());
}

#[test]
fn stale_clear_does_not_blank_newer_status() {
    // First cycle fails and schedules a clear.
    let (state, effects) = update(WorkflowState::new(), Msg::ShortenClicked);
    let stale = scheduled_generation(&effects);

    // Second cycle succeeds before the first clear fires.
    let state = start(state, "https://example.com");
    let (mut state, effects) = update(
        state,
        Msg::ShortenCompleted {
            request_id: 1,
            outcome: ShortenOutcome::Success {
                short_url: "https://is.gd/abc".to_string(),
            },
        },
    );
    let fresh = scheduled_generation(&effects);
    assert_ne!(stale, fresh);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::StatusClearDue { generation: stale });
    assert!(!state.consume_dirty());
    assert_eq!(state.phase(), Phase::Succeeded);
    assert!(state.status_message().is_some());

    let (state, _) = update(state, Msg::StatusClearDue { generation: fresh });
    assert_eq!(state.status_message(), None);
}

#[test]
fn clear_pending_from_previous_cycle_cannot_blank_loading_state() {
    let (state, effects) = update(WorkflowState::new(), Msg::ShortenClicked);
    let stale = scheduled_generation(&effects);
    let state = start(state, "https://example.com");

    let (state, _) = update(state, Msg::StatusClearDue { generation: stale });

    assert_eq!(state.phase(), Phase::Loading);
}
