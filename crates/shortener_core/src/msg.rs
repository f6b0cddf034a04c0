#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User asked to shorten the current input.
    ShortenClicked,
    /// Engine finished a shorten request.
    ShortenCompleted {
        request_id: crate::RequestId,
        outcome: ShortenOutcome,
    },
    /// A scheduled status clear fired.
    StatusClearDue { generation: u64 },
    /// User cleared the input and result.
    ClearClicked,
    CopyClicked,
    MailClicked,
    OpenInBrowserClicked,
    ShareClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    Success {
        short_url: String,
    },
    Failure {
        reason: FailureReason,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    InvalidInput,
    NetworkError,
    ApiError,
    MalformedResponse,
}

impl FailureReason {
    /// Status text shown when the failure carries no message of its own.
    pub fn default_message(self) -> &'static str {
        match self {
            FailureReason::InvalidInput => "empty input",
            FailureReason::NetworkError => "network error",
            FailureReason::ApiError => "is.gd reported an error",
            FailureReason::MalformedResponse => "could not parse the response",
        }
    }
}
