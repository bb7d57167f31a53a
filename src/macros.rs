//! Small crate-wide convenience macros.

/// Debug-only logging. Compiles to nothing in release builds so hot paths
/// (event handlers, table rendering) stay quiet in production consoles.
///
/// ```rust,ignore
/// debug_log!("refresh queued, {} rows cached", rows.len());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            log::debug!($($arg)*);
        }
    };
}
