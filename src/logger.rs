use log::LevelFilter;

/// Initialize the logger; `level` overrides anything set through `RUST_LOG`.
///
/// Only this crate's messages are raised to `level`; dependencies stay at warnings.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module("voxtrace", level)
        .format_timestamp_millis()
        .init();
}
