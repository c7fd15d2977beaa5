//! Live probing of instance endpoints.
//!
//! # Features
//!
//! - Transport selection by top-level label: onion hosts go through Tor,
//!   everything else must be https over a direct client
//! - Fixed three-attempt retry with no delay between attempts
//! - Optional custom User-Agent supplied through [`ProbeConfig`]
//!
//! # Example
//!
//! ```no_run
//! use catalog_core::probe::{HttpProber, Probe, ProbeConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let prober = HttpProber::new(&ProbeConfig::default())?;
//! let body = prober.fetch("https://example.com", false).await?;
//! println!("{} bytes", body.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod retry;
mod tor;

pub use client::{
    DIRECT_TIMEOUT, HttpProber, ONION_TIMEOUT, Probe, ProbeConfig, Transport, build_client,
    fetch_body, select_transport,
};
pub use error::ProbeError;
pub use retry::{DEFAULT_MAX_ATTEMPTS, RetryPolicy};
pub use tor::{DEFAULT_TOR_PROXY, TorProxy};
