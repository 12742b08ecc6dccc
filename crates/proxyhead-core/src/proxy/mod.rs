//! Proxy endpoint parsed from a `scheme://[user[:pass]@]host[:port]` string.
//!
//! Only host, port and credentials drive the request; libcurl treats the
//! proxy as a plain HTTP proxy. The scheme is kept for logging.

mod parse;

use std::fmt;

use crate::error::FetchError;

pub use parse::parse_proxy_url;

/// Proxy port applied when the URL has none: the HTTP port, which is what
/// libcurl picks for an `http://` proxy.
pub const DEFAULT_PROXY_PORT: u16 = 80;

/// Proxy host, optional port and optional basic credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    /// Scheme as parsed (lowercase). Informational only.
    pub scheme: String,
    /// Host name or IP literal; IPv6 literals keep their brackets.
    pub host: String,
    /// Explicit port, `None` when the URL had none.
    pub port: Option<u16>,
    /// Username exactly as written in the URL (not percent-decoded).
    pub username: Option<String>,
    /// Password exactly as written in the URL (not percent-decoded).
    pub password: Option<String>,
}

impl ProxyEndpoint {
    /// Parse a proxy URL. A missing `scheme://` prefix is read as `http://`.
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        parse_proxy_url(input)
    }

    /// `(username, password)` for proxy basic auth, if a username was given.
    /// The password defaults to the empty string.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.username
            .as_deref()
            .map(|user| (user, self.password.as_deref().unwrap_or("")))
    }

    /// Port the fetcher hands to libcurl: the explicit one, else [`DEFAULT_PROXY_PORT`].
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PROXY_PORT)
    }
}

/// Renders the endpoint with the password masked, safe for logs and errors.
impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if let Some((user, _)) = self.credentials() {
            write!(f, "{}:***@", user)?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}
