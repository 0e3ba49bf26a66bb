use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub(crate) const LOG_ENV: &str = "IXMON_LOG";

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr subscriber. `-v` flags take precedence over
/// `IXMON_LOG`; without either only warnings are shown.
pub(crate) fn init(verbose: u8) {
    let filter = if verbose > 0 {
        EnvFilter::new(level_for(verbose))
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(0)))
    };

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
