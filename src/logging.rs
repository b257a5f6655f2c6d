use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Everything goes to stderr: stdout carries
/// protocol frames in `serve` mode and tool output in `run` mode.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
