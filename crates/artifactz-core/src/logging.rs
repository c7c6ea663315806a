use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str = "artifactz=info,artifactz_core=info,artifactz_client=info";
pub const VERBOSE_LOG_FILTER: &str = "artifactz=debug,artifactz_core=debug,artifactz_client=debug";

pub fn init() {
    init_with_default(DEFAULT_LOG_FILTER);
}

/// Diagnostics go to stderr so stdout stays reserved for the build log.
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();
}

pub fn init_verbose() {
    init_with_default(VERBOSE_LOG_FILTER);
}
