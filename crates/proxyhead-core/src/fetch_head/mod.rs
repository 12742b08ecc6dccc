//! Header-only HTTP fetch through an optional proxy.
//!
//! Uses the curl crate (libcurl) with `nobody` set, so a HEAD request is sent
//! and no body is read. The response preamble is collected through the header
//! callback exactly as received: status line(s) and header lines in server
//! order, line terminators included.

mod parse;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::error::{classify_curl_error, FetchError};
use crate::proxy::ProxyEndpoint;

/// Transfer settings for a single fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Connect timeout; zero lets libcurl use its built-in default.
    pub connect_timeout: Duration,
    /// Whole-transfer timeout; zero means none.
    pub timeout: Duration,
    /// Follow `Location` redirects. Each response's header block is kept.
    pub follow_redirects: bool,
    /// Extra request headers (e.g. proxy hint headers), sent in name order.
    pub extra_headers: BTreeMap<String, String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            follow_redirects: false,
            extra_headers: BTreeMap::new(),
        }
    }
}

/// Raw response preamble of a header-only fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    raw: Vec<u8>,
}

impl FetchResult {
    pub fn new(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    /// The bytes exactly as sent by the server or proxy.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.raw
    }

    /// Preamble as text; invalid UTF-8 is replaced, the stored bytes are not touched.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// Every status line in order: CONNECT replies, redirects, final response.
    pub fn status_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| parse::is_status_line(l))
            .collect()
    }

    /// Status code of the last status line.
    pub fn status_code(&self) -> Option<u32> {
        self.status_lines()
            .last()
            .and_then(|line| parse::status_code(line))
    }

    /// Header lines (`Name: value`) without status lines or terminators.
    pub fn header_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| !parse::is_status_line(l))
            .collect()
    }

    fn lines(&self) -> Vec<String> {
        parse::split_lines(&self.raw)
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }
}

/// Fetch the response headers of `target_url`, routed through `proxy_url`.
///
/// `None` or a blank `proxy_url` sends the request directly. Blocks until the
/// transfer completes or fails.
pub fn fetch_headers(
    target_url: &str,
    proxy_url: Option<&str>,
    opts: &FetchOptions,
) -> Result<FetchResult, FetchError> {
    let proxy = match proxy_url.map(str::trim) {
        Some(p) if !p.is_empty() => Some(ProxyEndpoint::parse(p)?),
        _ => None,
    };
    fetch_headers_via(target_url, proxy.as_ref(), opts)
}

/// Like [`fetch_headers`] but with an already parsed proxy endpoint.
pub fn fetch_headers_via(
    target_url: &str,
    proxy: Option<&ProxyEndpoint>,
    opts: &FetchOptions,
) -> Result<FetchResult, FetchError> {
    validate_target(target_url)?;

    let fail = |e: curl::Error| classify_curl_error(e, target_url, proxy);
    let mut raw: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(target_url).map_err(fail)?;
    easy.nobody(true).map_err(fail)?; // HEAD request
    easy.follow_location(opts.follow_redirects).map_err(fail)?;
    easy.connect_timeout(opts.connect_timeout).map_err(fail)?;
    easy.timeout(opts.timeout).map_err(fail)?;

    match proxy {
        Some(p) => {
            tracing::debug!("HEAD {} via proxy {}", target_url, p);
            easy.proxy(&p.host).map_err(fail)?;
            // Ignore NO_PROXY from the environment; an explicit proxy is always used.
            easy.noproxy("").map_err(fail)?;
            easy.proxy_port(p.effective_port()).map_err(fail)?;
            if let Some((user, pass)) = p.credentials() {
                easy.proxy_username(user).map_err(fail)?;
                easy.proxy_password(pass).map_err(fail)?;
            }
        }
        None => {
            tracing::debug!("HEAD {} direct", target_url);
            // Empty string disables proxies picked up from the environment too.
            easy.proxy("").map_err(fail)?;
        }
    }

    // Build curl list for extra headers (e.g. "Name: value").
    if !opts.extra_headers.is_empty() {
        let mut list = curl::easy::List::new();
        for (k, v) in &opts.extra_headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))
                .map_err(fail)?;
        }
        easy.http_headers(list).map_err(fail)?;
    }

    let outcome = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                raw.extend_from_slice(data);
                true
            })
            .map_err(fail)?;
        // Never let a stray body reach libcurl's default sink (stdout).
        transfer.write_function(|data| Ok(data.len())).map_err(fail)?;
        transfer.perform()
    };

    let result = FetchResult::new(raw);
    match outcome {
        Ok(()) => {
            tracing::info!(
                "HEAD {} -> {}",
                target_url,
                result
                    .status_code()
                    .map_or_else(|| "no status".to_string(), |c| c.to_string())
            );
            Ok(result)
        }
        Err(e) if proxy.is_some() && parse::ends_with_error_block(result.as_bytes()) => {
            // Proxy answered the tunnel request itself (e.g. 407); hand that back verbatim.
            tracing::warn!(
                "HEAD {}: proxy refused request ({}), returning its response",
                target_url,
                e
            );
            Ok(result)
        }
        Err(e) => {
            let err = fail(e);
            tracing::warn!("HEAD {} failed: {}", target_url, err);
            Err(err)
        }
    }
}

/// Target must be an absolute URL with a host.
fn validate_target(target_url: &str) -> Result<(), FetchError> {
    let url = Url::parse(target_url).map_err(|e| FetchError::invalid_url(target_url, e.to_string()))?;
    match url.host_str() {
        Some(h) if !h.is_empty() => Ok(()),
        _ => Err(FetchError::invalid_url(target_url, "missing host")),
    }
}
