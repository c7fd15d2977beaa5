//! Mock servers need a loopback socket, which some sandboxes refuse.
//!
//! Tests that bind one start through [`start_mock_server_or_skip`] and
//! return early when binding is impossible. Set
//! `INSTANCE_CATALOG_REQUIRE_SOCKET_TESTS=1` to turn that skip into a failure.

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

const REQUIRE_ENV: &str = "INSTANCE_CATALOG_REQUIRE_SOCKET_TESTS";

fn skipping_forbidden() -> bool {
    std::env::var(REQUIRE_ENV).is_ok_and(|value| {
        let value = value.trim();
        value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
    })
}

fn loopback_available() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Starts a mock server, or returns `None` after noting why the caller skips.
#[track_caller]
pub fn start_mock_server_or_skip() -> impl Future<Output = Option<MockServer>> {
    let caller = Location::caller();
    let available = loopback_available();
    if !available {
        let note = format!(
            "{}:{}: no loopback socket available for the mock server",
            caller.file(),
            caller.line()
        );
        assert!(!skipping_forbidden(), "{note} ({REQUIRE_ENV} is set)");
        eprintln!("{note}; skipping");
    }
    async move {
        if available {
            Some(MockServer::start().await)
        } else {
            None
        }
    }
}
