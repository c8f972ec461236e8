/// Conditional logging for development builds
///
/// The `debug_log!` macro forwards to `log::debug!` and is compiled out of
/// release builds by default. Summaries and anything a caller may need in
/// production should use the `log` macros (`info!`, `warn!`) directly.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// # Examples
///
/// ```ignore
/// rail_conflicts::debug_log!("section {} skipped", "MSH_ADI");
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)+) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            ::log::debug!(target: "rail_conflicts", $($arg)+);
        }
    };
}

pub use debug_log;
