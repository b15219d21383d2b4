//! Console reporting seam.
//!
//! The registry announces shutdown saves and save failures through a
//! [`Reporter`] supplied by the hosting application. The default
//! [`ConsoleReporter`] forwards to the `log` facade; tests substitute a
//! recording implementation.

/// Receives the registry's host-visible console messages.
pub trait Reporter {
    fn report(&self, message: &str, is_error: bool);
}

/// Routes messages to `log::error!` / `log::info!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, message: &str, is_error: bool) {
        if is_error {
            log::error!("{message}");
        } else {
            log::info!("{message}");
        }
    }
}
