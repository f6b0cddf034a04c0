use url::Url;

use crate::ResponseFormat;

pub const DEFAULT_ENDPOINT: &str = "https://is.gd/create.php";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("empty input")]
pub struct InvalidInput;

pub fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("DEFAULT_ENDPOINT is an absolute URL")
}

/// Builds the is.gd request URL for `long_url` against the default endpoint.
pub fn build(long_url: &str, format: ResponseFormat) -> Result<Url, InvalidInput> {
    build_request_url(&default_endpoint(), long_url, format)
}

/// Builds `{endpoint}?format=..&url=..`, percent-encoding the trimmed input.
///
/// Everything outside the RFC 3986 unreserved set is escaped, so `?`, `&`,
/// `=`, `#`, `/`, `+`, spaces and non-ASCII text survive the trip intact.
/// Any query already present on `endpoint` is replaced.
pub fn build_request_url(
    endpoint: &Url,
    long_url: &str,
    format: ResponseFormat,
) -> Result<Url, InvalidInput> {
    let trimmed = long_url.trim();
    if trimmed.is_empty() {
        return Err(InvalidInput);
    }

    let query = format!(
        "format={}&url={}",
        format.query_value(),
        urlencoding::encode(trimmed)
    );
    let mut url = endpoint.clone();
    url.set_query(Some(&query));
    Ok(url)
}
