//! HTTP transport for the job-board backend.
//!
//! Every call:
//! - reuses one connection pool with a cookie store, so the session cookie
//!   set by `/user/login` is attached to later requests automatically
//! - carries an `x-request-id` header
//! - runs inside an `api_request` tracing span and records metrics
//!
//! Failures are never retried.

use std::time::{Duration, Instant};

use futures_util::future::FutureExt;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info_span, Instrument};
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::inflight::{Flight, InFlight};
use crate::metrics::{record_deduplicated, record_request};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Identity of an idempotent request for in-flight deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub method: Method,
    pub path: String,
}

/// Client for the job-board REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    inflight: InFlight<RequestKey, ApiResult<String>>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            ApiError::InvalidRequest(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;

        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("jobzee-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            inflight: InFlight::new(),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop sharing requests that went out under the old credentials.
    pub(crate) fn credentials_changed(&self) {
        debug!(outstanding = self.inflight.len(), "Credentials changed; detaching in-flight requests");
        self.inflight.clear();
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    /// GET and decode JSON. Concurrent identical GETs share one request.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> ApiResult<T> {
        let key = RequestKey {
            method: Method::GET,
            path: path.to_string(),
        };

        let this = self.clone();
        let owned_path = path.to_string();
        let (body, flight) = self
            .inflight
            .run(key, move || {
                async move {
                    let request = this.http.get(this.url(&owned_path));
                    this.execute(operation, Method::GET, &owned_path, request).await
                }
                .boxed()
            })
            .await;

        if flight == Flight::Joined {
            debug!(operation, path, "Joined in-flight request");
            record_deduplicated(operation);
        }

        decode(&body?)
    }

    /// Send a request with an optional JSON body and decode the JSON reply.
    pub(crate) async fn send_json<B, T>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let text = self.execute(operation, method, path, request).await?;
        decode(&text)
    }

    /// POST a multipart form and decode the JSON reply.
    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        form: Form,
    ) -> ApiResult<T> {
        let request = self.http.post(self.url(path)).multipart(form);
        let text = self.execute(operation, Method::POST, path, request).await?;
        decode(&text)
    }

    /// Execute a request with tracing and metrics; returns the body of a
    /// successful response.
    async fn execute(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<String> {
        let request_id = Uuid::new_v4().to_string();
        let span = info_span!(
            "api_request",
            operation = %operation,
            method = %method,
            path = %path,
            request_id = %request_id
        );

        let start = Instant::now();
        let result = async {
            let response = request.header(REQUEST_ID_HEADER, &request_id).send().await?;
            let status = response.status();
            let body = response.text().await?;

            if status.is_success() {
                debug!(status = status.as_u16(), "Request succeeded");
                Ok(body)
            } else {
                debug!(status = status.as_u16(), "Request failed");
                Err(ApiError::from_http_status(status.as_u16(), &body))
            }
        }
        .instrument(span)
        .await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(0),
        };
        record_request(operation, status, latency_ms);

        result
    }
}

/// Decode a JSON body, keeping a short prefix of it for diagnostics.
fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| {
        let end = body
            .char_indices()
            .nth(200)
            .map(|(i, _)| i)
            .unwrap_or(body.len());
        ApiError::invalid_response(format!("{} (body prefix: {})", e, &body[..end]))
    })
}

/// Percent-encode an id for use as a path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
