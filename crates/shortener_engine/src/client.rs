use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::StreamExt;
use url::Url;

use crate::request::{build_request_url, default_endpoint};
use crate::{decode_body, ErrorKind, ResponseFormat, ShortenRequest, ShortenResult};

#[derive(Debug, Clone)]
pub struct ShortenerSettings {
    pub endpoint: Url,
    /// `None` keeps the HTTP stack's own default.
    pub request_timeout: Option<Duration>,
    pub max_body_bytes: u64,
    pub user_agent: String,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout: None,
            max_body_bytes: 64 * 1024,
            user_agent: format!("isgd-shortener/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ShortenerSettings {
    /// Replaces the endpoint, which must be an absolute `http`/`https` URL.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, SettingsError> {
        let invalid = |message: String| SettingsError::Endpoint {
            endpoint: endpoint.to_string(),
            message,
        };
        let parsed = Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        self.endpoint = parsed;
        Ok(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid endpoint {endpoint:?}: {message}")]
    Endpoint { endpoint: String, message: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[async_trait::async_trait]
pub trait Shortener: Send + Sync {
    /// Issues exactly one request; never retries.
    async fn shorten(&self, request: &ShortenRequest) -> ShortenResult;
}

#[derive(Debug, Clone)]
pub struct ReqwestShortener {
    settings: ShortenerSettings,
    client: reqwest::Client,
}

impl ReqwestShortener {
    pub fn new(settings: ShortenerSettings) -> Result<Self, SettingsError> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { settings, client })
    }

    async fn fetch_body(&self, url: Url) -> Result<(reqwest::StatusCode, Vec<u8>), ShortenResult> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        engine_debug!("is.gd responded with status {}", status);

        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok((status, bytes))
    }
}

#[async_trait::async_trait]
impl Shortener for ReqwestShortener {
    async fn shorten(&self, request: &ShortenRequest) -> ShortenResult {
        let url = match build_request_url(&self.settings.endpoint, &request.long_url, request.format)
        {
            Ok(url) => url,
            Err(err) => return ShortenResult::failure(ErrorKind::InvalidInput, err.to_string()),
        };

        engine_info!(
            "Calling is.gd format={} url_len={}",
            request.format.query_value(),
            request.long_url.trim().len()
        );

        let result = match self.fetch_body(url).await {
            Ok((status, body)) => classify(status, request.format, &body),
            Err(failure) => failure,
        };
        if let ShortenResult::Failure { reason, message } = &result {
            engine_warn!("Shortening failed ({}): {}", reason, message);
        }
        result
    }
}

/// Decodes the body, keeping service-reported errors even on non-2xx statuses.
fn classify(status: reqwest::StatusCode, format: ResponseFormat, body: &[u8]) -> ShortenResult {
    let decoded = decode_body(format, body);
    if status.is_success() {
        return decoded;
    }
    match decoded {
        failure @ ShortenResult::Failure {
            reason: ErrorKind::ApiError,
            ..
        } => failure,
        _ => ShortenResult::failure(ErrorKind::NetworkError, format!("http status {status}")),
    }
}

fn too_large(max_bytes: u64, actual: u64) -> ShortenResult {
    ShortenResult::failure(
        ErrorKind::MalformedResponse,
        format!("response too large (max {max_bytes}, actual {actual})"),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ShortenResult {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    ShortenResult::failure(ErrorKind::NetworkError, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_must_be_http() {
        let settings = ShortenerSettings::default()
            .with_endpoint("http://127.0.0.1:8080/create.php")
            .unwrap();
        assert_eq!(settings.endpoint.port(), Some(8080));

        assert!(matches!(
            ShortenerSettings::default().with_endpoint("ftp://is.gd/create.php"),
            Err(SettingsError::Endpoint { .. })
        ));
        assert!(matches!(
            ShortenerSettings::default().with_endpoint("is.gd/create.php"),
            Err(SettingsError::Endpoint { .. })
        ));
    }

    #[test]
    fn non_success_status_keeps_api_errors_only() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            classify(status, ResponseFormat::Plain, b"Error, please enter a valid URL"),
            ShortenResult::Failure {
                reason: ErrorKind::ApiError,
                message: "Error, please enter a valid URL".to_string()
            }
        );
        assert_eq!(
            classify(
                reqwest::StatusCode::NOT_FOUND,
                ResponseFormat::Plain,
                b"Not Found"
            ),
            ShortenResult::Failure {
                reason: ErrorKind::NetworkError,
                message: "http status 404 Not Found".to_string()
            }
        );
    }
}
