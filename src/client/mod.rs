pub mod auth;
pub mod decode;
pub mod form;

use reqwest::{header::HeaderMap, Client, StatusCode};

use crate::{
    config::ClientConfig,
    error::Result,
    models::{TryOnRequest, TryOnResponse},
};

pub use auth::Auth;
pub use form::{FieldValue, FormFields};

pub const TRY_ON_PATH: &str = "/try-on-file";

/// Client for the try-on endpoint.
///
/// Cheap to clone; clones share the underlying HTTP transport. Holds no
/// per-call state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct TryOnClient {
    http: Client,
    endpoint: String,
    auth: Auth,
    auth_headers: HeaderMap,
}

impl std::fmt::Debug for TryOnClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryOnClient")
            .field("endpoint", &self.endpoint)
            .field("auth", &self.auth)
            .finish()
    }
}

struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TryOnClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_http_client(config, Client::new())
    }

    pub fn with_http_client(config: ClientConfig, http: Client) -> Result<Self> {
        let base_url = config.parsed_base_url()?;
        let auth = Auth::for_base_url(&base_url, config.api_key.as_str());
        let auth_headers = auth.headers()?;

        if let Auth::Gateway { host, .. } = &auth {
            log::info!("Using RapidAPI proxy: {}", host);
        }

        let base = config
            .base_url
            .strip_suffix('/')
            .unwrap_or(&config.base_url);

        Ok(Self {
            http,
            endpoint: format!("{}{}", base, TRY_ON_PATH),
            auth,
            auth_headers,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Sends one try-on request.
    ///
    /// Never fails: a call that gets no HTTP response comes back with
    /// `status_code == 0`, and bodies that don't decode leave the matching
    /// field empty.
    pub async fn try_on(&self, request: &TryOnRequest) -> TryOnResponse {
        match self.send(request).await {
            Ok(raw) => decode_response(raw, request.raw_response),
            Err(e) => {
                log::error!(
                    "Try-on request to {} failed: {} ({:?})",
                    self.endpoint,
                    error_chain(&e),
                    e
                );
                TryOnResponse::transport_failure()
            }
        }
    }

    async fn send(&self, request: &TryOnRequest) -> Result<RawResponse> {
        let fields = FormFields::from_request(request)?;

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.auth_headers.clone())
            .multipart(fields.into_multipart()?)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn decode_response(raw: RawResponse, raw_mode: bool) -> TryOnResponse {
    let RawResponse {
        status,
        headers,
        body,
    } = raw;

    let mut result = TryOnResponse {
        status_code: status.as_u16(),
        raw_response: raw_mode,
        ..Default::default()
    };

    if status != StatusCode::OK {
        log::warn!(
            "Request failed, status code: {}, response: {}",
            status.as_u16(),
            String::from_utf8_lossy(&body)
        );

        result.error_details =
            decode::degrade("error_details", decode::decode_error_details(&body));
        result.raw_bytes = Some(body);
        return result;
    }

    result.seed = decode::degrade("seed", decode::decode_seed(&headers)).flatten();

    if raw_mode {
        result.raw_bytes = Some(body);
        return result;
    }

    match decode::decode_image(&body) {
        Ok(image) => result.image = Some(image),
        Err(e) => {
            log::debug!(
                "Leaving image empty, {} byte body did not decode: {}",
                body.len(),
                e
            );
            result.raw_bytes = Some(body);
        }
    }

    result
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
