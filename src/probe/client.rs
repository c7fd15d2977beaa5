//! HTTP prober with direct and Tor transports.
//!
//! Clearnet instances go out over a direct client with a 30 second timeout
//! and must use https. Onion instances go through the Tor SOCKS proxy with a
//! 60 second timeout, and only after the proxy has been seen accepting
//! connections.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use tracing::{debug, instrument};
use url::Url;

use super::error::ProbeError;
use super::retry::RetryPolicy;
use super::tor::TorProxy;
use crate::parser::is_onion_url;
use crate::user_agent;

/// Total request timeout for clearnet probes.
pub const DIRECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Total request timeout for onion probes.
pub const ONION_TIMEOUT: Duration = Duration::from_secs(60);

/// Fetches an instance's landing page.
///
/// The Entry Builder and the Assembler only see this trait, so a run can be
/// driven by a scripted probe in tests.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Returns the response body of a GET against `url`.
    ///
    /// `onion_disabled` turns every onion URL into
    /// [`ProbeError::OnionTransportDisabled`] without touching the network.
    async fn fetch(&self, url: &str, onion_disabled: bool) -> Result<String, ProbeError>;

    /// Whether the anonymizing transport is usable right now.
    async fn onion_transport_ready(&self) -> bool;
}

/// Process-wide probe settings, passed in explicitly.
#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    /// Custom client identifier; the default User-Agent when `None`.
    pub user_agent: Option<String>,
    /// Tor SOCKS proxy used for onion hosts.
    pub tor_proxy: TorProxy,
    /// Attempts per probe.
    pub retry: RetryPolicy,
}

/// [`Probe`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpProber {
    direct: Client,
    tor: Client,
    tor_proxy: TorProxy,
    retry: RetryPolicy,
}

impl HttpProber {
    /// Builds both transports from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ClientBuild`] when either client cannot be
    /// constructed (TLS backend or SOCKS support unavailable).
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let user_agent = user_agent::resolve_user_agent(config.user_agent.as_deref());
        debug!(user_agent = %user_agent, tor_proxy = config.tor_proxy.url(), "building probe clients");
        Ok(Self {
            direct: build_client(&user_agent, DIRECT_TIMEOUT, None)?,
            tor: build_client(&user_agent, ONION_TIMEOUT, Some(&config.tor_proxy))?,
            tor_proxy: config.tor_proxy.clone(),
            retry: config.retry,
        })
    }
}

#[async_trait]
impl Probe for HttpProber {
    #[instrument(skip(self, url), fields(url = %url))]
    async fn fetch(&self, url: &str, onion_disabled: bool) -> Result<String, ProbeError> {
        let client = match select_transport(url, onion_disabled)? {
            Transport::Direct => &self.direct,
            Transport::Tor => {
                if !self.tor_proxy.is_running().await {
                    return Err(ProbeError::OnionTransportUnavailable {
                        url: url.to_string(),
                    });
                }
                &self.tor
            }
        };

        self.retry
            .run(|attempt| {
                debug!(attempt, "probing");
                fetch_body(client, url)
            })
            .await
    }

    async fn onion_transport_ready(&self) -> bool {
        self.tor_proxy.is_running().await
    }
}

/// Which client a URL is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Plain HTTPS.
    Direct,
    /// Through the Tor SOCKS proxy.
    Tor,
}

/// Picks the transport for `url`, rejecting combinations that are never probed.
///
/// # Errors
///
/// Returns [`ProbeError::NoUrl`], [`ProbeError::InvalidUrl`],
/// [`ProbeError::OnionTransportDisabled`], or [`ProbeError::NonHttpsOnClearnet`].
pub fn select_transport(url: &str, onion_disabled: bool) -> Result<Transport, ProbeError> {
    if url.is_empty() {
        return Err(ProbeError::NoUrl);
    }
    let parsed = Url::parse(url).map_err(|_| ProbeError::InvalidUrl {
        url: url.to_string(),
    })?;
    let scheme = parsed.scheme();
    if !matches!(scheme, "http" | "https") {
        return Err(ProbeError::InvalidUrl {
            url: url.to_string(),
        });
    }

    if is_onion_url(url) {
        if onion_disabled {
            return Err(ProbeError::OnionTransportDisabled {
                url: url.to_string(),
            });
        }
        return Ok(Transport::Tor);
    }

    if scheme != "https" {
        return Err(ProbeError::NonHttpsOnClearnet {
            url: url.to_string(),
        });
    }
    Ok(Transport::Direct)
}

/// Builds a probe client, optionally routed through the Tor proxy.
///
/// # Errors
///
/// Returns [`ProbeError::ClientBuild`] when reqwest rejects the configuration.
pub fn build_client(
    user_agent: &str,
    timeout: Duration,
    tor_proxy: Option<&TorProxy>,
) -> Result<Client, ProbeError> {
    let transport = if tor_proxy.is_some() { "tor" } else { "direct" };
    let mut builder = Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .gzip(true);

    if let Some(proxy) = tor_proxy {
        let proxy = Proxy::all(proxy.url())
            .map_err(|source| ProbeError::ClientBuild { transport, source })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|source| ProbeError::ClientBuild { transport, source })
}

/// One GET attempt: success status required, body returned as text.
///
/// # Errors
///
/// Returns [`ProbeError::Network`] for transport failures and
/// [`ProbeError::HttpStatus`] for non-2xx responses.
pub async fn fetch_body(client: &Client, url: &str) -> Result<String, ProbeError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ProbeError::network(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProbeError::http_status(url, status.as_u16()));
    }

    response.text().await.map_err(|e| ProbeError::network(url, e))
}
