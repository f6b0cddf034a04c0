use std::fmt;

pub type RequestId = u64;

/// Reply encoding requested through the `format` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Plain,
    Json,
}

impl ResponseFormat {
    pub fn query_value(self) -> &'static str {
        match self {
            ResponseFormat::Plain => "simple",
            ResponseFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenRequest {
    pub long_url: String,
    pub format: ResponseFormat,
}

impl ShortenRequest {
    pub fn new(long_url: impl Into<String>, format: ResponseFormat) -> Self {
        Self {
            long_url: long_url.into(),
            format,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input was empty after trimming; nothing was sent.
    InvalidInput,
    /// Transport-level failure.
    NetworkError,
    /// The service reported an error.
    ApiError,
    /// The body could not be understood.
    MalformedResponse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidInput => write!(f, "invalid input"),
            ErrorKind::NetworkError => write!(f, "network error"),
            ErrorKind::ApiError => write!(f, "api error"),
            ErrorKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenResult {
    Success { short_url: String },
    Failure { reason: ErrorKind, message: String },
}

impl ShortenResult {
    pub(crate) fn failure(reason: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            reason,
            message: message.into(),
        }
    }

    pub fn short_url(&self) -> Option<&str> {
        match self {
            ShortenResult::Success { short_url } => Some(short_url),
            ShortenResult::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<ErrorKind> {
        match self {
            ShortenResult::Success { .. } => None,
            ShortenResult::Failure { reason, .. } => Some(*reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ShortenCompleted {
        request_id: RequestId,
        result: ShortenResult,
    },
    TimerElapsed {
        token: u64,
    },
}
