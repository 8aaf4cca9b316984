//! Console logging for the browser build.
//!
//! Native builds (tests, tooling) leave logger installation to the caller.

/// Route `log` records to the browser console and install the panic hook.
/// Safe to call more than once.
pub fn init(level: log::Level) {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            log::debug!("logging: console logger already installed");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = level;
    }
}
