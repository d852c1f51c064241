//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output from every costbasis crate when `verbose` is set.
pub fn init(verbose: bool) {
    let default = if verbose {
        "costbasis=debug,costbasis_engine=debug,costbasis_core=debug"
    } else {
        "costbasis=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
