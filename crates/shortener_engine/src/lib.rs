//! Shortener engine: request building, the is.gd client and effect execution.
mod client;
mod decode;
mod engine;
mod host;
mod request;
mod types;

pub use client::{ReqwestShortener, SettingsError, Shortener, ShortenerSettings};
pub use decode::{decode_body, decode_json, decode_plain, EMPTY_BODY_MESSAGE, NOT_UTF8_MESSAGE};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use host::{mailto_uri, HostActionError, HostActions, SystemHostActions, MAIL_SUBJECT};
pub use request::{build, build_request_url, default_endpoint, InvalidInput, DEFAULT_ENDPOINT};
pub use types::{EngineEvent, ErrorKind, RequestId, ResponseFormat, ShortenRequest, ShortenResult};
