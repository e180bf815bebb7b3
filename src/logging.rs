// logging module - tracing subscriber setup for diagnostics

use tracing_subscriber::{fmt, EnvFilter};

/// install the stderr subscriber; `RUST_LOG` wins over the verbose flag
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
