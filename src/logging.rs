//! Logger bootstrap.
//!
//! The library itself only talks to the `log` facade. Hosts that have no
//! logger of their own can call [`init`] once at startup.

use crate::config::LogLevel;

/// Install a logger at the given level.
///
/// Native builds use `env_logger`, so `RUST_LOG` still overrides the level.
/// Calling this more than once is harmless; later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized at {:?}", level);
    }
}

/// Install a logger at the given level.
///
/// WASM builds log to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) {
    console_error_panic_hook::set_once();

    let Some(level) = level.to_level_filter().to_level() else {
        return;
    };
    if console_log::init_with_level(level).is_ok() {
        log::debug!("Logger initialized at {:?}", level);
    }
}
