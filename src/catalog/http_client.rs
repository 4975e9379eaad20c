//! Shared HTTP client construction policy for catalog clients.
//!
//! Centralizes networking defaults so every catalog client is consistent on
//! timeout, user-agent, compression, and proxy compatibility.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use super::CatalogError;

/// Default connect timeout for catalog requests.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default whole-request timeout for catalog requests.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Connect and read timeouts applied to a catalog client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// TCP/TLS connect timeout in seconds.
    pub connect_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// Where a catalog client discovers its proxy settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProxySource {
    /// reqwest's default discovery, which may consult the operating system.
    System,
    /// Only the conventional proxy environment variables.
    Environment,
}

/// Proxy environment variables per scheme, in lookup order.
const PROXY_ENV_VARS: [(&str, &[&str]); 2] = [
    ("https", &["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"]),
    ("http", &["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]),
];

/// Builds a catalog HTTP client using shared project policy.
///
/// `catalog_name` is used only for error messages and logging.
///
/// # Errors
///
/// Returns [`CatalogError::ClientBuild`] when client construction fails.
pub fn build_catalog_http_client(
    catalog_name: &str,
    user_agent: impl Into<String>,
    timeouts: HttpTimeouts,
) -> Result<Client, CatalogError> {
    let user_agent = user_agent.into();

    let outcome = build_client(&user_agent, timeouts, ProxySource::System).or_else(|panicked| {
        // System proxy discovery panics in some sandboxes.
        warn!(
            catalog = catalog_name,
            reason = panicked,
            "Catalog client construction panicked; retrying with environment proxies only"
        );
        build_client(&user_agent, timeouts, ProxySource::Environment)
    });

    match outcome {
        Ok(Ok(client)) => Ok(client),
        Ok(Err(error)) => Err(CatalogError::client_build(
            catalog_name,
            &format!("HTTP client construction failed: {error}"),
        )),
        Err(_) => Err(CatalogError::client_build(
            catalog_name,
            "HTTP client construction panicked while initializing networking",
        )),
    }
}

/// Runs one construction attempt. The outer `Err` carries a caught panic.
fn build_client(
    user_agent: &str,
    timeouts: HttpTimeouts,
    proxies: ProxySource,
) -> Result<Result<Client, reqwest::Error>, &'static str> {
    catch_unwind(AssertUnwindSafe(|| {
        let builder = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.read_secs))
            .user_agent(user_agent)
            .gzip(true);
        let builder = match proxies {
            ProxySource::System => builder,
            ProxySource::Environment => with_env_proxies(builder.no_proxy(), |name| {
                std::env::var(name).ok()
            }),
        };
        builder.build()
    }))
    .map_err(|_| "panic during client construction")
}

/// Registers one proxy per scheme from the first non-blank variable found.
/// Unparseable proxy URLs are skipped.
fn with_env_proxies(
    mut builder: ClientBuilder,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientBuilder {
    for (scheme, names) in PROXY_ENV_VARS {
        let Some(url) = first_configured(names, &lookup) else {
            continue;
        };
        let proxy = if scheme == "https" {
            Proxy::https(&url)
        } else {
            Proxy::http(&url)
        };
        match proxy {
            Ok(proxy) => builder = builder.proxy(proxy),
            Err(error) => warn!(scheme, error = %error, "Ignoring invalid proxy URL"),
        }
    }
    builder
}

fn first_configured(names: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    names
        .iter()
        .filter_map(|name| lookup(*name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_timeouts_default() {
        let timeouts = HttpTimeouts::default();
        assert_eq!(timeouts.connect_secs, 10);
        assert_eq!(timeouts.read_secs, 30);
    }

    #[test]
    fn test_build_catalog_http_client_succeeds_with_defaults() {
        let result = build_catalog_http_client("scopus", "ua/1.0", HttpTimeouts::default());
        assert!(result.is_ok());
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        move |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        }
    }

    #[test]
    fn test_first_configured_skips_blank_values_in_order() {
        let lookup = vars(&[("HTTPS_PROXY", "  "), ("ALL_PROXY", " http://proxy:3128 ")]);
        assert_eq!(
            first_configured(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY"], &lookup),
            Some("http://proxy:3128".to_string())
        );
    }

    #[test]
    fn test_first_configured_none_when_unset() {
        assert!(first_configured(&["HTTP_PROXY", "http_proxy"], vars(&[])).is_none());
    }

    #[test]
    fn test_env_proxies_build_with_valid_and_invalid_urls() {
        let lookup = vars(&[("HTTPS_PROXY", "http://proxy:3128"), ("HTTP_PROXY", "::not a url::")]);
        let builder = with_env_proxies(Client::builder().no_proxy(), lookup);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_client_with_environment_proxies() {
        let outcome = build_client("ua/1.0", HttpTimeouts::default(), ProxySource::Environment);
        assert!(matches!(outcome, Ok(Ok(_))));
    }
}
