use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Verbosity comes from `RUST_LOG` (e.g. `RUST_LOG=floorbook=debug`) and
/// defaults to `warn`. Events go to stderr so the report on stdout stays
/// machine-readable. Calling this more than once is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
