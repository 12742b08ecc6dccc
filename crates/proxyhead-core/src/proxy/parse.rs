//! Parse proxy URL strings into ProxyEndpoint.

use std::borrow::Cow;

use url::Url;

use super::ProxyEndpoint;
use crate::error::FetchError;

/// Parse `scheme://[user[:pass]@]host[:port]` into a ProxyEndpoint.
///
/// Input without `://` is read as `http://<input>`, so `127.0.0.1:8090`
/// works. Fails with `InvalidUrl` when the URL does not parse or has no host.
pub fn parse_proxy_url(input: &str) -> Result<ProxyEndpoint, FetchError> {
    let trimmed = input.trim();
    let candidate: Cow<'_, str> = if trimmed.contains("://") {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("http://{}", trimmed))
    };

    let url = Url::parse(&candidate).map_err(|e| FetchError::invalid_url(input, e.to_string()))?;

    let host = match url.host_str() {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => return Err(FetchError::invalid_url(input, "missing proxy host")),
    };

    let port = url.port().or_else(|| explicit_default_port(&candidate, &url));
    let username = Some(url.username())
        .filter(|u| !u.is_empty())
        .map(str::to_string);
    let password = url.password().map(str::to_string);

    Ok(ProxyEndpoint {
        scheme: url.scheme().to_string(),
        host,
        port,
        username,
        password,
    })
}

/// `Url::port` hides a port equal to the scheme default (`http://p:80`).
/// Recover it from the raw authority so it is still applied explicitly.
fn explicit_default_port(raw: &str, url: &Url) -> Option<u16> {
    let default = url.port_or_known_default()?;
    let (_, after_scheme) = raw.split_once("://")?;
    let authority = after_scheme.split(['/', '?', '#']).next()?;
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);
    let (_, port) = host_port.rsplit_once(':')?;
    let port: u16 = port.parse().ok()?;
    (port == default).then_some(port)
}
