use anyhow::{Context, Result};
use catalog_core::{ProbeConfig, RetryPolicy, RunOptions, TorProxy};

use crate::cli::Args;

/// Environment variable carrying a custom client identifier for probes.
pub(crate) const USER_AGENT_ENV: &str = "INSTANCE_CATALOG_USER_AGENT";

pub(crate) fn resolve_default_log_level(args: &Args) -> &'static str {
    if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// `RUST_LOG` only wins when the user did not ask for a level on the command line.
pub(crate) fn should_force_cli_log_level(args: &Args) -> bool {
    args.verbose > 0 || args.quiet
}

pub(crate) fn custom_user_agent_from_env() -> Option<String> {
    std::env::var(USER_AGENT_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn resolve_run_options(args: &Args) -> RunOptions {
    RunOptions {
        input: args.input.clone(),
        import: args.import.clone(),
        no_tor: args.no_tor,
        fail_fast: args.fail_fast,
    }
}

pub(crate) fn resolve_probe_config(args: &Args, user_agent: Option<String>) -> Result<ProbeConfig> {
    let tor_proxy = TorProxy::new(&args.tor_proxy)
        .with_context(|| format!("invalid --tor-proxy value '{}'", args.tor_proxy))?;
    Ok(ProbeConfig {
        user_agent,
        tor_proxy,
        retry: RetryPolicy::default(),
    })
}
