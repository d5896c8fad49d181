//! Logging setup.

/// Initializes `env_logger`. The filter comes from `RUST_LOG` and defaults to `info`.
///
/// Calling it more than once is harmless: later calls are ignored.
pub(crate) fn init_logger() {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_target(true)
        .try_init();

    match result {
        Ok(()) => log::debug!("Logger initialized"),
        Err(err) => log::debug!("Logger is already initialized: {err}"),
    }
}
