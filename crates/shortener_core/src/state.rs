use crate::view_model::WorkflowView;
use crate::{ResponseGate, WorkflowConfig};

pub type RequestId = u64;

pub const SUCCESS_COPIED_MESSAGE: &str = "Shortened and copied to clipboard";
pub const SUCCESS_MESSAGE: &str = "Shortened";
pub const COPIED_MESSAGE: &str = "Copied to clipboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// State of one shorten workflow, owned by a single UI surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowState {
    config: WorkflowConfig,
    phase: Phase,
    input: String,
    short_url: Option<String>,
    status_message: Option<String>,
    is_error: bool,
    /// Highest request id handed out so far; 0 before the first request.
    issued: RequestId,
    /// Request whose completion is still awaited, if any.
    pending: Option<RequestId>,
    /// Requests up to this id were issued before the last clear and are ignored.
    cleared_through: RequestId,
    /// Stamp carried by the most recently scheduled status clear.
    clear_generation: u64,
    dirty: bool,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WorkflowConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn short_url(&self) -> Option<&str> {
        self.short_url.as_deref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn view(&self) -> WorkflowView {
        WorkflowView {
            phase: self.phase,
            input: self.input.clone(),
            short_url: self.short_url.clone(),
            status_message: self.status_message.clone(),
            is_error: self.is_error,
            actions_enabled: self.short_url.is_some(),
            last_request_id: (self.issued > 0).then_some(self.issued),
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    /// Enters `Loading` for the current input and returns the new request id
    /// together with the trimmed URL to send.
    pub(crate) fn begin_request(&mut self) -> (RequestId, String) {
        self.issued += 1;
        self.pending = Some(self.issued);
        self.phase = Phase::Loading;
        self.short_url = None;
        self.status_message = None;
        self.is_error = false;
        self.invalidate_status_clear();
        self.mark_dirty();
        (self.issued, self.input.trim().to_string())
    }

    /// Whether a completion for `request_id` may update the display.
    pub(crate) fn accepts(&self, request_id: RequestId) -> bool {
        if request_id <= self.cleared_through {
            return false;
        }
        match self.config.gate {
            ResponseGate::LatestWins => self.pending == Some(request_id),
            ResponseGate::Ungated => request_id > 0 && request_id <= self.issued,
        }
    }

    pub(crate) fn complete_request(&mut self, request_id: RequestId) {
        if self.pending == Some(request_id) {
            self.pending = None;
        }
    }

    /// Enters `Succeeded` and returns the generation of the status to clear later.
    pub(crate) fn enter_succeeded(&mut self, short_url: String) -> u64 {
        self.phase = Phase::Succeeded;
        self.short_url = Some(short_url);
        let message = if self.config.copy_on_success {
            SUCCESS_COPIED_MESSAGE
        } else {
            SUCCESS_MESSAGE
        };
        self.show_status(message.to_string(), false)
    }

    /// Enters `Failed` and returns the generation of the status to clear later.
    pub(crate) fn enter_failed(&mut self, message: String) -> u64 {
        self.phase = Phase::Failed;
        self.show_status(message, true)
    }

    /// Sets the status message and stamps it with a fresh clear generation.
    pub(crate) fn show_status(&mut self, message: String, is_error: bool) -> u64 {
        self.status_message = Some(message);
        self.is_error = is_error;
        self.mark_dirty();
        self.invalidate_status_clear()
    }

    /// Clears the status if `generation` is still the latest one. Returns whether it did.
    pub(crate) fn clear_status_if_current(&mut self, generation: u64) -> bool {
        if generation != self.clear_generation || self.status_message.is_none() {
            return false;
        }
        self.status_message = None;
        self.is_error = false;
        if matches!(self.phase, Phase::Succeeded | Phase::Failed) {
            self.phase = Phase::Idle;
        }
        self.mark_dirty();
        true
    }

    /// Drops input, result and status, and forgets the pending request.
    pub(crate) fn reset(&mut self) {
        self.input.clear();
        self.short_url = None;
        self.status_message = None;
        self.is_error = false;
        self.pending = None;
        self.cleared_through = self.issued;
        self.phase = Phase::Idle;
        self.invalidate_status_clear();
        self.mark_dirty();
    }

    fn invalidate_status_clear(&mut self) -> u64 {
        self.clear_generation += 1;
        self.clear_generation
    }
}

/// True when `candidate` parses as an absolute URI.
pub fn is_well_formed_uri(candidate: &str) -> bool {
    !candidate.trim().is_empty() && url::Url::parse(candidate).is_ok()
}
