pub mod config;
pub mod error;
pub mod fetch_head;
pub mod logging;
pub mod proxy;

pub use error::FetchError;
pub use fetch_head::{fetch_headers, fetch_headers_via, FetchOptions, FetchResult};
pub use proxy::ProxyEndpoint;
