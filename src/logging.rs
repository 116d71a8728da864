use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

/// Install the stderr subscriber
///
/// `APIMETA_LOG` takes precedence over `default_level`. Calling this twice is
/// harmless; the second subscriber is simply not installed.
pub fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let _ = subscriber.try_init();
}
