use std::sync::{mpsc, Arc};

use engine_logging::{engine_info, engine_warn};
use shortener_core::{Effect, FailureReason, Msg, ResponseFormat, ShortenOutcome};
use shortener_engine::{
    EngineError, EngineEvent, EngineHandle, ErrorKind, EventSink, HostActionError, HostActions,
    ShortenRequest, ShortenResult, ShortenerSettings, SystemHostActions,
};

use super::app::UiEvent;

/// Posts engine events onto the UI loop as messages.
pub(crate) struct UiEventSink {
    tx: mpsc::Sender<UiEvent>,
}

impl UiEventSink {
    pub(crate) fn new(tx: mpsc::Sender<UiEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for UiEventSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::ShortenCompleted { request_id, result } => Msg::ShortenCompleted {
                request_id,
                outcome: map_result(result),
            },
            EngineEvent::TimerElapsed { token } => Msg::StatusClearDue { generation: token },
        };
        let _ = self.tx.send(UiEvent::Dispatch(msg));
    }
}

pub(crate) struct EffectRunner {
    engine: EngineHandle,
    host: Box<dyn HostActions>,
}

impl EffectRunner {
    pub(crate) fn new(
        settings: ShortenerSettings,
        tx: mpsc::Sender<UiEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings, Arc::new(UiEventSink::new(tx)))?;
        Ok(Self::with_parts(engine, Box::new(SystemHostActions::new())))
    }

    pub(crate) fn with_parts(engine: EngineHandle, host: Box<dyn HostActions>) -> Self {
        Self { engine, host }
    }

    pub(crate) fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Shorten {
                    request_id,
                    long_url,
                    format,
                } => {
                    engine_info!(
                        "Shorten request_id={} format={:?} url_len={}",
                        request_id,
                        format,
                        long_url.len()
                    );
                    self.engine
                        .shorten(request_id, ShortenRequest::new(long_url, map_format(format)));
                }
                Effect::ScheduleStatusClear { generation, after } => {
                    self.engine.schedule_timer(generation, after);
                }
                Effect::CopyToClipboard { text } => {
                    report("copy to clipboard", self.host.copy_to_clipboard(&text));
                }
                Effect::ComposeMail { short_url } => {
                    report("compose mail", self.host.compose_mail(&short_url));
                }
                Effect::OpenInBrowser { url } => {
                    report("open in browser", self.host.open_in_browser(&url));
                }
                Effect::SystemShare { items } => {
                    report("share", self.host.system_share(&items));
                }
            }
        }
    }
}

fn report(action: &str, result: Result<(), HostActionError>) {
    if let Err(err) = result {
        engine_warn!("{} failed: {}", action, err);
    }
}

fn map_format(format: ResponseFormat) -> shortener_engine::ResponseFormat {
    match format {
        ResponseFormat::Plain => shortener_engine::ResponseFormat::Plain,
        ResponseFormat::Json => shortener_engine::ResponseFormat::Json,
    }
}

fn map_result(result: ShortenResult) -> ShortenOutcome {
    match result {
        ShortenResult::Success { short_url } => ShortenOutcome::Success { short_url },
        ShortenResult::Failure { reason, message } => ShortenOutcome::Failure {
            reason: map_reason(reason),
            message,
        },
    }
}

fn map_reason(reason: ErrorKind) -> FailureReason {
    match reason {
        ErrorKind::InvalidInput => FailureReason::InvalidInput,
        ErrorKind::NetworkError => FailureReason::NetworkError,
        ErrorKind::ApiError => FailureReason::ApiError,
        ErrorKind::MalformedResponse => FailureReason::MalformedResponse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_events_become_messages() {
        let (tx, rx) = mpsc::channel();
        let sink = UiEventSink::new(tx);

        sink.emit(EngineEvent::ShortenCompleted {
            request_id: 3,
            result: ShortenResult::Failure {
                reason: ErrorKind::MalformedResponse,
                message: "bad".to_string(),
            },
        });
        sink.emit(EngineEvent::TimerElapsed { token: 9 });

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                UiEvent::Dispatch(Msg::ShortenCompleted {
                    request_id: 3,
                    outcome: ShortenOutcome::Failure {
                        reason: FailureReason::MalformedResponse,
                        message: "bad".to_string(),
                    },
                }),
                UiEvent::Dispatch(Msg::StatusClearDue { generation: 9 }),
            ]
        );
    }
}
