//! Fetch error type and libcurl error classification.

use thiserror::Error;

use crate::proxy::ProxyEndpoint;

/// Error returned by a header fetch.
///
/// A proxy answering `407 Proxy Authentication Required` is not an error: the
/// status line comes back as a normal [`FetchResult`](crate::FetchResult).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Target or proxy URL could not be parsed. Raised before any network activity.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The proxy could not be resolved or connected to.
    #[error("proxy {proxy} unreachable on port {port}")]
    ProxyUnreachable {
        /// Redacted proxy endpoint (password masked).
        proxy: String,
        /// Port libcurl was told to connect to.
        port: u16,
        #[source]
        source: curl::Error,
    },

    /// Transport failure reaching the target (refused, timeout, reset, TLS, ...).
    #[error("connection failure")]
    ConnectionFailure(#[source] curl::Error),
}

impl FetchError {
    pub(crate) fn invalid_url(url: &str, reason: impl Into<String>) -> Self {
        FetchError::InvalidUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Map a libcurl error onto the fetch taxonomy.
///
/// With a proxy configured, libcurl only ever connects to the proxy, so a
/// failed connect means the proxy is unreachable.
pub(crate) fn classify_curl_error(
    e: curl::Error,
    target_url: &str,
    proxy: Option<&ProxyEndpoint>,
) -> FetchError {
    if e.is_url_malformed() {
        return FetchError::invalid_url(target_url, e.to_string());
    }
    match proxy {
        Some(p) if e.is_couldnt_resolve_proxy() || e.is_couldnt_connect() => {
            FetchError::ProxyUnreachable {
                proxy: p.to_string(),
                port: p.effective_port(),
                source: e,
            }
        }
        _ => FetchError::ConnectionFailure(e),
    }
}
