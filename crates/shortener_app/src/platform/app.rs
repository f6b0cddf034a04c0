use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_debug, engine_info};
use shortener_core::{update, Msg, Phase, WorkflowConfig, WorkflowState, WorkflowView};
use shortener_engine::{EngineError, ShortenerSettings};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::{self, input::InputAction};

/// Everything the UI loop reacts to, funnelled through one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiEvent {
    Dispatch(Msg),
    ShowHelp,
    InputClosed,
    Quit,
}

/// One workflow instance plus the loop that owns it.
///
/// All `update` calls happen on the thread that drives `next_event`.
pub(crate) struct Surface {
    state: WorkflowState,
    runner: EffectRunner,
    tx: mpsc::Sender<UiEvent>,
    rx: mpsc::Receiver<UiEvent>,
}

impl Surface {
    pub(crate) fn new(
        workflow: WorkflowConfig,
        settings: ShortenerSettings,
    ) -> Result<Self, EngineError> {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(settings, tx.clone())?;
        Ok(Self::from_parts(workflow, runner, tx, rx))
    }

    pub(crate) fn from_parts(
        workflow: WorkflowConfig,
        runner: EffectRunner,
        tx: mpsc::Sender<UiEvent>,
        rx: mpsc::Receiver<UiEvent>,
    ) -> Self {
        Self {
            state: WorkflowState::with_config(workflow),
            runner,
            tx,
            rx,
        }
    }

    pub(crate) fn sender(&self) -> mpsc::Sender<UiEvent> {
        self.tx.clone()
    }

    pub(crate) fn next_event(&self) -> Option<UiEvent> {
        self.rx.recv().ok()
    }

    #[cfg(test)]
    pub(crate) fn next_event_within(&self, timeout: std::time::Duration) -> Option<UiEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    pub(crate) fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Applies `msg`, runs its effects and returns a view when a render is due.
    pub(crate) fn dispatch(&mut self, msg: Msg) -> Option<WorkflowView> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        let view = state.consume_dirty().then(|| state.view());
        self.state = state;
        view
    }
}

pub fn run_window(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let workflow = config.workflow(WorkflowConfig::main_window());
    let mut surface = Surface::new(workflow, config.shortener_settings()?)?;
    let mut out = io::stdout().lock();

    ui::terminal::execute(&mut out, &ui::layout::initial_commands())?;
    spawn_input_reader(surface.sender());

    let mut input_closed = false;
    while let Some(event) = surface.next_event() {
        match event {
            UiEvent::Dispatch(msg) => {
                // Typed input is already on screen.
                let redraw = !matches!(msg, Msg::InputChanged(_));
                if let Some(view) = surface.dispatch(msg).filter(|_| redraw) {
                    ui::terminal::execute(&mut out, &ui::render::render(&view))?;
                }
            }
            UiEvent::ShowHelp => {
                ui::terminal::execute(&mut out, &ui::layout::help_commands())?;
            }
            UiEvent::InputClosed => input_closed = true,
            UiEvent::Quit => break,
        }
        // With stdin gone, stay until the last result has been shown and cleared.
        if input_closed && surface.phase() == Phase::Idle {
            engine_debug!("Input closed and workflow idle; leaving window loop");
            break;
        }
    }

    engine_info!("Window surface closed");
    Ok(ExitCode::SUCCESS)
}

fn spawn_input_reader(tx: mpsc::Sender<UiEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let events = match ui::input::parse_line(&line) {
                InputAction::Dispatch(msgs) => msgs.into_iter().map(UiEvent::Dispatch).collect(),
                InputAction::Help => vec![UiEvent::ShowHelp],
                InputAction::Quit => vec![UiEvent::Quit],
            };
            for event in events {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = tx.send(UiEvent::InputClosed);
    });
}
