//! Diagnostic output.
//!
//! The catalog document may go to stdout, so every log line is written to
//! stderr. ANSI styling is turned off by `--no-color`, a non-empty `NO_COLOR`,
//! or `TERM=dumb`.

use tracing_subscriber::EnvFilter;

use crate::cli::Args;

/// The parts of the process environment that affect styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ColorEnv {
    no_color: bool,
    dumb_term: bool,
}

impl ColorEnv {
    pub(crate) fn from_process() -> Self {
        Self {
            no_color: std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()),
            dumb_term: std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb")),
        }
    }

    pub(crate) fn allows_ansi(self, no_color_flag: bool) -> bool {
        !(no_color_flag || self.no_color || self.dumb_term)
    }
}

pub(crate) fn ansi_enabled(args: &Args) -> bool {
    ColorEnv::from_process().allows_ansi(args.no_color)
}

/// Installs the global stderr subscriber.
///
/// `RUST_LOG` is honoured unless `force_cli_level` is set or it fails to parse;
/// `default_level` applies otherwise.
pub(crate) fn init_tracing(default_level: &str, force_cli_level: bool, ansi: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) if !force_cli_level => from_env,
        _ => EnvFilter::new(default_level),
    };
    // Already installed when called twice in one process
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::ColorEnv;

    #[test]
    fn test_plain_environment_allows_ansi() {
        assert!(ColorEnv::default().allows_ansi(false));
    }

    #[test]
    fn test_flag_disables_ansi() {
        assert!(!ColorEnv::default().allows_ansi(true));
    }

    #[test]
    fn test_environment_disables_ansi() {
        let no_color = ColorEnv {
            no_color: true,
            dumb_term: false,
        };
        let dumb = ColorEnv {
            no_color: false,
            dumb_term: true,
        };
        assert!(!no_color.allows_ansi(false));
        assert!(!dumb.allows_ansi(false));
    }
}
