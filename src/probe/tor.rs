//! Tor SOCKS proxy settings and the "is Tor running" check.

use std::time::Duration;

use tokio::net::TcpStream;
use tracing::debug;
use url::Url;

use super::ProbeError;

/// Default Tor SOCKS proxy; `socks5h` resolves onion hosts proxy-side.
pub const DEFAULT_TOR_PROXY: &str = "socks5h://127.0.0.1:9050";

const DEFAULT_SOCKS_PORT: u16 = 9050;

/// How long the liveness check waits for the SOCKS port to accept.
const LIVENESS_TIMEOUT: Duration = Duration::from_secs(3);

/// Location of the Tor SOCKS proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorProxy {
    url: String,
    socket_addr: String,
}

impl TorProxy {
    /// Parses a proxy URL such as `socks5h://127.0.0.1:9050`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidUrl`] when the URL does not parse or has no host.
    pub fn new(proxy_url: &str) -> Result<Self, ProbeError> {
        let invalid = || ProbeError::InvalidUrl {
            url: proxy_url.to_string(),
        };
        let parsed = Url::parse(proxy_url).map_err(|_| invalid())?;
        let host = parsed.host_str().ok_or_else(invalid)?;
        let port = parsed.port().unwrap_or(DEFAULT_SOCKS_PORT);
        Ok(Self {
            url: proxy_url.to_string(),
            socket_addr: format!("{host}:{port}"),
        })
    }

    /// The proxy URL handed to the HTTP client.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `host:port` of the SOCKS listener.
    #[must_use]
    pub fn socket_addr(&self) -> &str {
        &self.socket_addr
    }

    /// Whether something accepts connections on the SOCKS port.
    pub async fn is_running(&self) -> bool {
        let connect = TcpStream::connect(self.socket_addr.as_str());
        let running = matches!(
            tokio::time::timeout(LIVENESS_TIMEOUT, connect).await,
            Ok(Ok(_))
        );
        debug!(proxy = %self.url, running, "checked Tor proxy");
        running
    }
}

impl Default for TorProxy {
    fn default() -> Self {
        Self {
            url: DEFAULT_TOR_PROXY.to_string(),
            socket_addr: format!("127.0.0.1:{DEFAULT_SOCKS_PORT}"),
        }
    }
}
