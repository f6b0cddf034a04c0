use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_trace};

use crate::client::{ReqwestShortener, SettingsError, Shortener, ShortenerSettings};
use crate::{EngineEvent, RequestId, ShortenRequest};

enum EngineCommand {
    Shorten {
        request_id: RequestId,
        request: ShortenRequest,
    },
    ScheduleTimer {
        token: u64,
        after: Duration,
    },
}

/// Receives engine events on whichever runtime thread produced them.
///
/// Front ends implement this to post events onto their UI context.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine thread: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Handle to the engine thread. Dropping it stops the thread once queued work is handed off.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ShortenerSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let shortener = Arc::new(ReqwestShortener::new(settings)?);
        Self::with_shortener(shortener, sink)
    }

    pub fn with_shortener(
        shortener: Arc<dyn Shortener>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("shortener-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let shortener = shortener.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(shortener.as_ref(), command, sink.as_ref()).await;
                    });
                }
                engine_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn shorten(&self, request_id: RequestId, request: ShortenRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Shorten {
            request_id,
            request,
        });
    }

    /// Emits `EngineEvent::TimerElapsed { token }` after `after`.
    pub fn schedule_timer(&self, token: u64, after: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ScheduleTimer { token, after });
    }
}

async fn handle_command(shortener: &dyn Shortener, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Shorten {
            request_id,
            request,
        } => {
            let result = shortener.shorten(&request).await;
            sink.emit(EngineEvent::ShortenCompleted { request_id, result });
        }
        EngineCommand::ScheduleTimer { token, after } => {
            tokio::time::sleep(after).await;
            engine_trace!("Timer {} elapsed after {:?}", token, after);
            sink.emit(EngineEvent::TimerElapsed { token });
        }
    }
}
