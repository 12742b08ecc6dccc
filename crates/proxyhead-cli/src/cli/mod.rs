//! CLI for proxyhead: one HEAD request through a proxy, raw headers to stdout.

mod fetch;

use anyhow::Result;
use clap::Parser;
use proxyhead_core::config::{self, ProbeConfig};
use std::path::PathBuf;

use fetch::run_fetch;

/// Print the raw response headers of a HEAD request sent through an HTTP proxy.
#[derive(Debug, Parser)]
#[command(name = "proxyhead")]
#[command(version)]
#[command(about = "Print raw response headers fetched through an HTTP proxy", long_about = None)]
pub struct Cli {
    /// Target URL to probe [default: config `target_url`, else http://www.example.com/].
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Proxy URL, scheme://[user:pass@]host[:port]. An empty value sends the request directly.
    #[arg(short = 'p', long = "proxy", value_name = "PROXY_URL")]
    pub proxy: Option<String>,

    /// Send the request directly, ignoring -p and the configured proxy.
    #[arg(long)]
    pub no_proxy: bool,

    /// Read settings from this TOML file instead of ~/.config/proxyhead/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Statuses the proxy should treat as success, e.g. "200,304" (sent as X-Man-Status-Ok).
    #[arg(long, value_name = "CODES")]
    pub status_ok: Option<String>,

    /// Upstream retries the proxy may make (sent as X-Man-Retry).
    #[arg(long, value_name = "N")]
    pub retry: Option<u32>,

    /// Follow redirects; every response's headers are printed.
    #[arg(short = 'L', long = "location")]
    pub location: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load(cli.config.as_deref())?;
        cli.apply_to(&mut cfg);
        tracing::debug!(
            "fallback={:?} connect_timeout={}s timeout={}s follow={}",
            cfg.proxy_fallback,
            cfg.connect_timeout_secs,
            cfg.timeout_secs,
            cfg.follow_redirects
        );

        run_fetch(&cfg, cli.url.as_deref(), cli.proxy.as_deref(), cli.no_proxy)
    }

    /// Layer flag values over the loaded config.
    pub fn apply_to(&self, cfg: &mut ProbeConfig) {
        if let Some(codes) = &self.status_ok {
            cfg.status_ok = Some(codes.clone());
        }
        if let Some(n) = self.retry {
            cfg.retry_hint = Some(n);
        }
        if self.location {
            cfg.follow_redirects = true;
        }
    }
}
