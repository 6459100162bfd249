use log::LevelFilter;

/// Initializes the logger at `level`.
///
/// `RUST_LOG` is read first, so per-module filters still work; `level` then
/// sets the global threshold.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
