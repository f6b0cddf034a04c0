use engine_logging::engine_debug;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{ErrorKind, ResponseFormat, ShortenResult};

pub const EMPTY_BODY_MESSAGE: &str = "is.gd returned an empty response";
pub const NOT_UTF8_MESSAGE: &str = "response is not valid UTF-8";

/// Shape of a `format=json` reply. Fields of the wrong type count as absent.
#[derive(Debug, Default, Deserialize)]
struct JsonReply {
    #[serde(default, deserialize_with = "string_or_absent")]
    shorturl: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    error: Option<String>,
    #[serde(default, deserialize_with = "int_or_absent")]
    errorcode: Option<i64>,
}

fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn int_or_absent<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_i64())
}

pub fn decode_body(format: ResponseFormat, body: &[u8]) -> ShortenResult {
    match format {
        ResponseFormat::Plain => match std::str::from_utf8(body) {
            Ok(text) => decode_plain(text),
            Err(err) => {
                engine_debug!("Plain body rejected: {}", err);
                ShortenResult::failure(ErrorKind::MalformedResponse, NOT_UTF8_MESSAGE)
            }
        },
        ResponseFormat::Json => decode_json(body),
    }
}

/// The trimmed body is the short URL unless it is empty or starts with `Error`.
pub fn decode_plain(body: &str) -> ShortenResult {
    let text = body.trim();
    if text.is_empty() {
        return ShortenResult::failure(ErrorKind::ApiError, EMPTY_BODY_MESSAGE);
    }
    if text.starts_with("Error") {
        return ShortenResult::failure(ErrorKind::ApiError, text);
    }
    ShortenResult::Success {
        short_url: text.to_string(),
    }
}

pub fn decode_json(body: &[u8]) -> ShortenResult {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            return ShortenResult::failure(
                ErrorKind::MalformedResponse,
                format!("invalid JSON: {err}"),
            )
        }
    };
    if !value.is_object() {
        return ShortenResult::failure(ErrorKind::MalformedResponse, "expected a JSON object");
    }
    let reply: JsonReply = match serde_json::from_value(value) {
        Ok(reply) => reply,
        Err(err) => {
            return ShortenResult::failure(
                ErrorKind::MalformedResponse,
                format!("unexpected JSON shape: {err}"),
            )
        }
    };

    match reply {
        JsonReply {
            shorturl: Some(short_url),
            ..
        } => ShortenResult::Success { short_url },
        JsonReply {
            error: Some(message),
            errorcode,
            ..
        } => {
            engine_debug!("is.gd error reply code={:?} message={}", errorcode, message);
            ShortenResult::failure(ErrorKind::ApiError, message)
        }
        JsonReply { .. } => ShortenResult::failure(
            ErrorKind::MalformedResponse,
            "response has neither shorturl nor error",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_body_is_short_url() {
        assert_eq!(
            decode_plain("https://is.gd/abc123"),
            ShortenResult::Success {
                short_url: "https://is.gd/abc123".to_string()
            }
        );
        assert_eq!(
            decode_plain("  https://is.gd/abc123\n").short_url(),
            Some("https://is.gd/abc123")
        );
    }

    #[test]
    fn plain_error_and_empty_bodies_fail() {
        assert_eq!(
            decode_plain("Error: bad url"),
            ShortenResult::Failure {
                reason: ErrorKind::ApiError,
                message: "Error: bad url".to_string()
            }
        );
        assert_eq!(decode_plain("").reason(), Some(ErrorKind::ApiError));
        assert_eq!(decode_plain(" \n ").reason(), Some(ErrorKind::ApiError));
    }

    #[test]
    fn plain_body_that_is_not_utf8_is_malformed() {
        assert_eq!(
            decode_body(ResponseFormat::Plain, b"https://is.gd/\xff\xfe"),
            ShortenResult::Failure {
                reason: ErrorKind::MalformedResponse,
                message: NOT_UTF8_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn json_success_and_error_replies() {
        assert_eq!(
            decode_json(br#"{"shorturl":"https://is.gd/abc123"}"#),
            ShortenResult::Success {
                short_url: "https://is.gd/abc123".to_string()
            }
        );
        assert_eq!(
            decode_json(br#"{"errorcode":1,"error":"no url"}"#),
            ShortenResult::Failure {
                reason: ErrorKind::ApiError,
                message: "no url".to_string()
            }
        );
    }

    #[test]
    fn json_without_known_keys_is_malformed() {
        assert_eq!(
            decode_json(b"{}").reason(),
            Some(ErrorKind::MalformedResponse)
        );
        assert_eq!(
            decode_json(b"{not json").reason(),
            Some(ErrorKind::MalformedResponse)
        );
        assert_eq!(
            decode_json(br#"["https://is.gd/abc"]"#).reason(),
            Some(ErrorKind::MalformedResponse)
        );
        assert_eq!(
            decode_json(br#"{"shorturl":42}"#).reason(),
            Some(ErrorKind::MalformedResponse)
        );
    }

    #[test]
    fn json_non_string_shorturl_falls_back_to_error() {
        assert_eq!(
            decode_json(br#"{"shorturl":null,"error":"rate limited","errorcode":"x"}"#),
            ShortenResult::Failure {
                reason: ErrorKind::ApiError,
                message: "rate limited".to_string()
            }
        );
    }

    #[test]
    fn body_dispatches_on_format() {
        let body = br#"{"shorturl":"https://is.gd/x"}"#;
        assert_eq!(
            decode_body(ResponseFormat::Json, body).short_url(),
            Some("https://is.gd/x")
        );
        // The same bytes read as plain text are taken verbatim.
        assert_eq!(
            decode_body(ResponseFormat::Plain, body).short_url(),
            Some(r#"{"shorturl":"https://is.gd/x"}"#)
        );
    }
}
