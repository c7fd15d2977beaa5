use catalog_core::{run_catalog, write_document};
use clap::Parser;
use tracing::{debug, error, info, warn};

use crate::ProcessExit;
use crate::app::{config_runtime, exit_handler, terminal};
use crate::cli::Args;

pub(crate) async fn run_instance_catalog() -> ProcessExit {
    // Parse before tracing so --help works without logs
    let args = Args::parse();

    let default_level = config_runtime::resolve_default_log_level(&args);
    let force_cli_log_level = config_runtime::should_force_cli_log_level(&args);
    terminal::init_tracing(
        default_level,
        force_cli_log_level,
        terminal::ansi_enabled(&args),
    );
    debug!(?args, "CLI arguments parsed");

    let options = config_runtime::resolve_run_options(&args);
    let probe_config = match config_runtime::resolve_probe_config(
        &args,
        config_runtime::custom_user_agent_from_env(),
    ) {
        Ok(config) => config,
        Err(err) => {
            error!("{err:#}");
            return ProcessExit::Fatal;
        }
    };

    info!(input = %options.input, output = %args.output, "Building instance catalog");

    let report = match run_catalog(&options, &probe_config).await {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "Run aborted");
            return ProcessExit::Fatal;
        }
    };

    if !report.failed.is_empty() {
        warn!(
            count = report.failed.len(),
            urls = %report.failed.join(", "),
            "Some instances failed"
        );
    }

    if let Some(document) = &report.document {
        if let Err(err) = write_document(document, &args.output) {
            error!(error = %err, "Could not write catalog");
            return ProcessExit::Partial;
        }
        info!(instances = document.instances.len(), output = %args.output, "Catalog written");
    }

    exit_handler::determine_exit_outcome(&report)
}
