use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::{Result, TryOnError};

pub const GATEWAY_DOMAIN_SUFFIX: &str = ".rapidapi.com";

pub const API_KEY_HEADER: &str = "x-api-key";
pub const GATEWAY_KEY_HEADER: &str = "x-rapidapi-key";
pub const GATEWAY_HOST_HEADER: &str = "x-rapidapi-host";

/// How requests authenticate, fixed when the client is built.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// Routed through the API marketplace gateway.
    Gateway { key: String, host: String },
    Direct { key: String },
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Gateway { host, .. } => f
                .debug_struct("Gateway")
                .field("key", &"<redacted>")
                .field("host", host)
                .finish(),
            Auth::Direct { .. } => f
                .debug_struct("Direct")
                .field("key", &"<redacted>")
                .finish(),
        }
    }
}

impl Auth {
    pub fn for_base_url(base_url: &Url, api_key: impl Into<String>) -> Self {
        let key = api_key.into();

        match base_url.host_str() {
            Some(host) if is_gateway_host(host) => Auth::Gateway {
                key,
                host: host.to_string(),
            },
            _ => Auth::Direct { key },
        }
    }

    pub fn is_gateway(&self) -> bool {
        matches!(self, Auth::Gateway { .. })
    }

    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        match self {
            Auth::Gateway { key, host } => {
                insert(&mut headers, GATEWAY_KEY_HEADER, key, true)?;
                insert(&mut headers, GATEWAY_HOST_HEADER, host, false)?;
            }
            Auth::Direct { key } => {
                insert(&mut headers, API_KEY_HEADER, key, true)?;
            }
        }

        Ok(headers)
    }
}

fn is_gateway_host(host: &str) -> bool {
    host.to_ascii_lowercase().ends_with(GATEWAY_DOMAIN_SUFFIX)
}

fn insert(
    headers: &mut HeaderMap,
    name: &'static str,
    value: &str,
    sensitive: bool,
) -> Result<()> {
    let mut value = HeaderValue::from_str(value).map_err(|e| TryOnError::InvalidHeader {
        name,
        reason: e.to_string(),
    })?;
    value.set_sensitive(sensitive);

    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}
