use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
fn make_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber. Logs go to stderr; stdout carries
/// command output.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(make_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
