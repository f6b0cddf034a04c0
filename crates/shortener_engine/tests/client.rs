use std::time::Duration;

use pretty_assertions::assert_eq;
use shortener_engine::{
    ErrorKind, ReqwestShortener, ResponseFormat, ShortenRequest, ShortenResult, Shortener,
    ShortenerSettings,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn shortener_for(server: &MockServer, tweak: impl FnOnce(&mut ShortenerSettings)) -> ReqwestShortener {
    let mut settings = ShortenerSettings::default()
        .with_endpoint(&format!("{}/create.php", server.uri()))
        .expect("mock endpoint");
    tweak(&mut settings);
    ReqwestShortener::new(settings).expect("client builds")
}

#[tokio::test]
async fn plain_format_returns_trimmed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/create.php"))
        .and(query_param("format", "simple"))
        .and(query_param("url", "https://example.com/a?b=1&c=2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("https://is.gd/abc123\n", "text/plain"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let shortener = shortener_for(&server, |_| {});
    let result = shortener
        .shorten(&ShortenRequest::new(
            "  https://example.com/a?b=1&c=2 ",
            ResponseFormat::Plain,
        ))
        .await;

    assert_eq!(
        result,
        ShortenResult::Success {
            short_url: "https://is.gd/abc123".to_string()
        }
    );
}

#[tokio::test]
async fn plain_format_error_line_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/create.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("Error, database insert failed", "text/plain"),
        )
        .mount(&server)
        .await;

    let shortener = shortener_for(&server, |_| {});
    let result = shortener
        .shorten(&ShortenRequest::new("https://example.com", ResponseFormat::Plain))
        .await;

    assert_eq!(result.reason(), Some(ErrorKind::ApiError));
}

#[tokio::test]
async fn json_format_success_and_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("format", "json"))
        .and(query_param("url", "https://good.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"shorturl":"https://is.gd/good"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("format", "json"))
        .and(query_param("url", "nope"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"errorcode":1,"error":"Please specify a valid URL to shorten."}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let shortener = shortener_for(&server, |_| {});

    let ok = shortener
        .shorten(&ShortenRequest::new("https://good.example.com", ResponseFormat::Json))
        .await;
    assert_eq!(ok.short_url(), Some("https://is.gd/good"));

    let err = shortener
        .shorten(&ShortenRequest::new("nope", ResponseFormat::Json))
        .await;
    assert_eq!(
        err,
        ShortenResult::Failure {
            reason: ErrorKind::ApiError,
            message: "Please specify a valid URL to shorten.".to_string()
        }
    );
}

#[tokio::test]
async fn json_format_unexpected_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let shortener = shortener_for(&server, |_| {});
    let result = shortener
        .shorten(&ShortenRequest::new("https://example.com", ResponseFormat::Json))
        .await;

    assert_eq!(result.reason(), Some(ErrorKind::MalformedResponse));
}

#[tokio::test]
async fn non_success_status_without_api_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let shortener = shortener_for(&server, |_| {});
    let result = shortener
        .shorten(&ShortenRequest::new("https://example.com", ResponseFormat::Json))
        .await;

    assert_eq!(
        result,
        ShortenResult::Failure {
            reason: ErrorKind::NetworkError,
            message: "http status 502 Bad Gateway".to_string()
        }
    );
}

#[tokio::test]
async fn empty_input_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("https://is.gd/x"))
        .expect(0)
        .mount(&server)
        .await;

    let shortener = shortener_for(&server, |_| {});
    let result = shortener
        .shorten(&ShortenRequest::new("   ", ResponseFormat::Plain))
        .await;

    assert_eq!(result.reason(), Some(ErrorKind::InvalidInput));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let shortener = shortener_for(&server, |settings| settings.max_body_bytes = 16);
    let result = shortener
        .shorten(&ShortenRequest::new("https://example.com", ResponseFormat::Plain))
        .await;

    assert_eq!(result.reason(), Some(ErrorKind::MalformedResponse));
}

#[tokio::test]
async fn configured_timeout_surfaces_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("https://is.gd/slow"),
        )
        .mount(&server)
        .await;

    let shortener = shortener_for(&server, |settings| {
        settings.request_timeout = Some(Duration::from_millis(50))
    });
    let result = shortener
        .shorten(&ShortenRequest::new("https://example.com", ResponseFormat::Plain))
        .await;

    assert_eq!(result.reason(), Some(ErrorKind::NetworkError));
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    // Bind then drop a server so the port is very likely closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let settings = ShortenerSettings::default()
        .with_endpoint(&format!("{uri}/create.php"))
        .unwrap();
    let shortener = ReqwestShortener::new(settings).unwrap();

    let result = shortener
        .shorten(&ShortenRequest::new("https://example.com", ResponseFormat::Plain))
        .await;

    assert_eq!(result.reason(), Some(ErrorKind::NetworkError));
}
