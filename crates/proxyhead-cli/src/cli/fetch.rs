//! Header fetch command: resolve target and proxy, fetch, print verbatim.

use anyhow::{Context, Result};
use proxyhead_core::config::ProbeConfig;
use proxyhead_core::fetch_headers;
use std::io::{self, Write};

/// Fetch headers for the resolved target and write them to stdout unchanged.
pub fn run_fetch(
    cfg: &ProbeConfig,
    url: Option<&str>,
    proxy: Option<&str>,
    no_proxy: bool,
) -> Result<()> {
    let target = cfg.resolve_target(url);
    let proxy = cfg.resolve_proxy(proxy, no_proxy);
    let opts = cfg.fetch_options();

    let result = fetch_headers(&target, proxy.as_deref(), &opts)
        .with_context(|| format!("HEAD {}", target))?;

    let mut out = io::stdout().lock();
    out.write_all(result.as_bytes()).context("write headers to stdout")?;
    out.flush().context("flush stdout")?;
    Ok(())
}
