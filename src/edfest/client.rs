//! Signed HTTP client for the Edinburgh Festivals listings API.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::diagnostics::{DiagnosticSink, NoopSink};
use super::error::{ClientError, ClientResult};
use super::params::QueryParams;
use super::policy;
use super::signer::{SignedRequest, sign};

/// Public endpoint of the festivals API.
pub const DEFAULT_BASE_URL: &str = "https://api.edinburghfestivalcity.com";

/// Default I/O timeout for a single request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Operating mode, deciding whether the live fringe dataset may be queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Fringe searches are redirected to the demo dataset.
    #[default]
    Demo,
    /// Fringe searches hit the live dataset.
    Real,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Real => "real",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "real" => Ok(Self::Real),
            other => Err(ClientError::configuration(format!(
                "unknown fringe mode '{other}', expected 'demo' or 'real'"
            ))),
        }
    }
}

/// API resource addressed by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Events,
    Venues,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Venues => "venues",
        }
    }
}

/// API key and shared signing secret.
#[derive(Clone)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Create credentials, rejecting an empty key or secret.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> ClientResult<Self> {
        let key = key.into();
        let secret = secret.into();
        if key.trim().is_empty() {
            return Err(ClientError::configuration("API key is missing or empty"));
        }
        if secret.trim().is_empty() {
            return Err(ClientError::configuration("API secret is missing or empty"));
        }
        Ok(Self { key, secret })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

/// Custom Debug implementation to redact the secret from logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// A decoded API response together with its HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Whether the remote service answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Client for the festivals API.
///
/// Holds immutable credentials and mode; every call builds, signs and sends
/// a fresh request, so one instance can be shared across tasks.
#[derive(Clone)]
pub struct FestivalClient {
    credentials: Credentials,
    mode: Mode,
    base_url: String,
    http: reqwest::Client,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for FestivalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FestivalClient")
            .field("credentials", &self.credentials)
            .field("mode", &self.mode)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FestivalClient {
    /// Create a client against the public endpoint with the default timeout
    /// and no diagnostic log.
    pub fn new(credentials: Credentials, mode: Mode) -> ClientResult<Self> {
        Ok(Self {
            credentials,
            mode,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: build_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            sink: Arc::new(NoopSink),
        })
    }

    /// Point the client at another endpoint (e.g. a staging host).
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> ClientResult<Self> {
        let raw = base_url.as_ref().trim_end_matches('/');
        let url = Url::parse(raw)
            .map_err(|e| ClientError::configuration(format!("invalid base URL '{raw}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::configuration(format!(
                "base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        self.base_url = raw.to_string();
        Ok(self)
    }

    /// Set the I/O timeout applied to each request.
    pub fn with_timeout(mut self, timeout: Duration) -> ClientResult<Self> {
        self.http = build_http_client(timeout)?;
        Ok(self)
    }

    /// Record every outgoing URL in `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search events. Returns the decoded JSON body unchanged.
    pub async fn events(&self, params: QueryParams) -> ClientResult<Value> {
        self.request(Resource::Events, params)
            .await
            .map(ApiResponse::into_body)
    }

    /// Search venues. Returns the decoded JSON body unchanged.
    pub async fn venues(&self, params: QueryParams) -> ClientResult<Value> {
        self.request(Resource::Venues, params)
            .await
            .map(ApiResponse::into_body)
    }

    /// Rewrite, sign and send a request, returning the body with its status.
    ///
    /// A non-2xx response carrying a JSON body is returned like any other
    /// result; only transport failures and non-JSON bodies are errors.
    #[instrument(skip(self, params))]
    pub async fn request(
        &self,
        resource: Resource,
        params: QueryParams,
    ) -> ClientResult<ApiResponse> {
        let signed = self.prepare(resource, params)?;

        self.record_url(&signed.full_url).await;

        debug!("Sending GET /{}", signed.path);
        let response = self.http.get(&signed.full_url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::remote(status.as_u16(), format!("response is not valid JSON: {e}"))
        })?;

        if !status.is_success() {
            warn!("Festival API answered {} for /{}", status, signed.path);
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }

    /// Hand the URL to the diagnostic sink on the blocking pool.
    ///
    /// Sinks may do file I/O. Failures are logged and otherwise ignored.
    async fn record_url(&self, url: &str) {
        let sink = Arc::clone(&self.sink);
        let entry = url.to_string();
        match tokio::task::spawn_blocking(move || sink.record(&entry)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!("Diagnostic log write failed: {}", e),
            Err(e) => debug!("Diagnostic log task failed: {}", e),
        }
    }

    /// Apply the rewrite policy and sign, without sending anything.
    pub fn prepare(&self, resource: Resource, params: QueryParams) -> ClientResult<SignedRequest> {
        let params = policy::rewrite(params, resource, self.credentials.key(), self.mode);
        sign(
            &self.base_url,
            resource.path(),
            &params,
            self.credentials.secret(),
        )
    }
}

fn build_http_client(timeout: Duration) -> ClientResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::configuration(format!("failed to create HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edfest::diagnostics::{FileSink, MemorySink};
    use httpmock::prelude::*;
    use serde_json::json;
    use std::io;

    fn credentials() -> Credentials {
        Credentials::new("test_key", "test_secret").unwrap()
    }

    fn client(server: &MockServer, mode: Mode) -> FestivalClient {
        FestivalClient::new(credentials(), mode)
            .unwrap()
            .with_base_url(server.base_url())
            .unwrap()
    }

    struct FailingSink;

    impl DiagnosticSink for FailingSink {
        fn record(&self, _entry: &str) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_credentials_reject_empty() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(ClientError::Configuration(_))
        ));
        assert!(matches!(
            Credentials::new("key", "  "),
            Err(ClientError::Configuration(_))
        ));
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let debug_str = format!("{:?}", credentials());
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("test_secret"));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("demo".parse::<Mode>().unwrap(), Mode::Demo);
        assert_eq!(" REAL ".parse::<Mode>().unwrap(), Mode::Real);
        assert!("live".parse::<Mode>().is_err());
        assert_eq!(Mode::default(), Mode::Demo);
    }

    #[test]
    fn test_invalid_base_url() {
        let client = FestivalClient::new(credentials(), Mode::Demo).unwrap();
        assert!(client.clone().with_base_url("not a url").is_err());
        assert!(client.with_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_prepare_reference_request() {
        let client = FestivalClient::new(credentials(), Mode::Demo).unwrap();
        let signed = client
            .prepare(
                Resource::Events,
                QueryParams::new().with("festival", "fringe").with("year", "2024"),
            )
            .unwrap();
        assert_eq!(
            signed.canonical_query,
            "festival=demofringe&year=2024&key=test_key"
        );
        assert_eq!(signed.signature, "0cf7ee911a5d058a1c24c7a386f8303bea68f1a3");
        assert!(signed.full_url.starts_with(DEFAULT_BASE_URL));
    }

    #[tokio::test]
    async fn test_events_fringe_demo_mode() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/events")
                    .query_param("festival", "demofringe")
                    .query_param("year", "2024")
                    .query_param("key", "test_key")
                    .query_param_exists("signature");
                then.status(200)
                    .json_body(json!({ "events": [{ "id": 1, "name": "Test Event" }] }));
            })
            .await;

        let result = client(&server, Mode::Demo)
            .events(QueryParams::new().with("festival", "fringe").with("year", "2024"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result, json!({ "events": [{ "id": 1, "name": "Test Event" }] }));
    }

    #[tokio::test]
    async fn test_events_fringe_real_mode() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/events")
                    .query_param("festival", "fringe");
                then.status(200)
                    .json_body(json!({ "events": [{ "id": 1, "name": "Real Event" }] }));
            })
            .await;

        let result = client(&server, Mode::Real)
            .events(QueryParams::new().with("festival", "fringe").with("year", "2024"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result["events"][0]["name"], "Real Event");
    }

    #[tokio::test]
    async fn test_events_non_fringe_festival() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/events").query_param("festival", "book");
                then.status(200)
                    .json_body(json!({ "events": [{ "id": 2, "name": "Book Festival Event" }] }));
            })
            .await;

        let result = client(&server, Mode::Demo)
            .events(QueryParams::new().with("festival", "book").with("year", "2024"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result["events"][0]["id"], 2);
    }

    #[tokio::test]
    async fn test_venues_returns_body_unchanged() {
        let server = MockServer::start_async().await;
        let body = json!({ "venues": [{ "id": 1, "name": "Test Venue", "images": {} }] });
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/venues")
                    .query_param("city", "Edinburgh")
                    .query_param("key", "test_key");
                then.status(200).json_body(body.clone());
            })
            .await;

        let result = client(&server, Mode::Demo)
            .venues(QueryParams::new().with("city", "Edinburgh"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn test_wildcard_year_omits_date_range() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/events")
                    .query_param("year", "*")
                    .query_param_missing("date_from")
                    .query_param_missing("date_to");
                then.status(200).json_body(json!([]));
            })
            .await;

        client(&server, Mode::Demo)
            .events(
                QueryParams::new()
                    .with("year", "*")
                    .with("date_from", "2025-01-01 00:00:00")
                    .with("date_to", "2025-12-31 23:59:59"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_body_passed_through() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/events");
                then.status(400).json_body(json!({ "error": "API Error" }));
            })
            .await;

        let client = client(&server, Mode::Demo);
        let body = client
            .events(QueryParams::new().with("festival", "test"))
            .await
            .unwrap();
        assert_eq!(body, json!({ "error": "API Error" }));

        let response = client
            .request(Resource::Events, QueryParams::new().with("festival", "test"))
            .await
            .unwrap();
        assert_eq!(response.status, 400);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_malformed_body_is_remote_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/venues");
                then.status(502).body("<html>Bad Gateway</html>");
            })
            .await;

        let result = client(&server, Mode::Demo).venues(QueryParams::new()).await;
        assert!(matches!(result, Err(ClientError::Remote { status: 502, .. })));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Nothing listens on port 9 of localhost in the test environment.
        let client = FestivalClient::new(credentials(), Mode::Demo)
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .unwrap()
            .with_timeout(Duration::from_secs(2))
            .unwrap();

        let result = client.venues(QueryParams::new()).await;
        assert!(matches!(result, Err(ClientError::Network(_))));
    }

    #[tokio::test]
    async fn test_signed_url_recorded_in_sink() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/events");
                then.status(200).json_body(json!({ "test": "data" }));
            })
            .await;

        let sink = Arc::new(MemorySink::new());
        let client = client(&server, Mode::Demo).with_sink(sink.clone());
        client
            .events(QueryParams::new().with("test", "param"))
            .await
            .unwrap();

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        let expected_prefix = format!("{}/events?test=param&key=test_key", server.base_url());
        assert!(entries[0].starts_with(&expected_prefix));
        assert!(entries[0].contains("&signature="));
        assert!(!entries[0].contains("test_secret"));
    }

    #[tokio::test]
    async fn test_signed_url_appended_to_log_file() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/venues");
                then.status(200).json_body(json!([]));
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error.log");
        let client = client(&server, Mode::Demo).with_sink(Arc::new(FileSink::new(&path)));
        client
            .venues(QueryParams::new().with("name", "Pleasance"))
            .await
            .unwrap();
        client.venues(QueryParams::new()).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let expected_prefix = format!("{}/venues?name=Pleasance&key=test_key", server.base_url());
        assert!(lines[0].starts_with(&expected_prefix));
        assert!(lines[1].starts_with(&format!("{}/venues?key=test_key", server.base_url())));
    }

    #[tokio::test]
    async fn test_unwritable_log_does_not_fail_request() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/venues");
                then.status(200).json_body(json!([]));
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("missing").join("error.log"));
        let client = client(&server, Mode::Demo).with_sink(Arc::new(sink));
        let body = client.venues(QueryParams::new()).await.unwrap();
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_sink_failure_is_not_fatal() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/venues");
                then.status(200).json_body(json!({ "venues": [] }));
            })
            .await;

        let client = client(&server, Mode::Demo).with_sink(Arc::new(FailingSink));
        let result = client.venues(QueryParams::new()).await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_independent_clients() {
        let server = MockServer::start_async().await;
        let first = server
            .mock_async(|when, then| {
                when.method(GET).path("/venues").query_param("key", "first");
                then.status(200).json_body(json!({ "who": "first" }));
            })
            .await;
        let second = server
            .mock_async(|when, then| {
                when.method(GET).path("/venues").query_param("key", "second");
                then.status(200).json_body(json!({ "who": "second" }));
            })
            .await;

        let a = FestivalClient::new(Credentials::new("first", "s1").unwrap(), Mode::Demo)
            .unwrap()
            .with_base_url(server.base_url())
            .unwrap();
        let b = FestivalClient::new(Credentials::new("second", "s2").unwrap(), Mode::Real)
            .unwrap()
            .with_base_url(server.base_url())
            .unwrap();

        let (ra, rb) = tokio::join!(a.venues(QueryParams::new()), b.venues(QueryParams::new()));

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(ra.unwrap()["who"], "first");
        assert_eq!(rb.unwrap()["who"], "second");
    }
}
