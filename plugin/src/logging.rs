use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. Later calls in the same process (the host
/// may load and unload the plugin repeatedly) keep the first subscriber.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
