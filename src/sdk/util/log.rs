use env_logger::{Builder, Env};

const DEFAULT_FILTER: &str = "info";

/// Installs the process-wide logger. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}

/// Logger for unit and integration tests; safe to call more than once.
pub fn init_test_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
