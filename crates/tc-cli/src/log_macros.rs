/// Domain-aware logging macros.
///
/// Each macro injects a `domain` field so the plain formatter can render it
/// as a `[domain]` prefix. Domains: `sys`, `conf`, `lang`, `preview`.
///
/// ```ignore
/// tc_info!(conf, path = %path.display(), "configuration loaded");
/// tc_debug!(preview, buckets = series.buckets.len(), "series normalized");
/// ```
///
/// The domain is a bare identifier, not a string.

#[doc(hidden)]
macro_rules! tc_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

macro_rules! tc_warn {
    ($domain:ident, $($rest:tt)*) => {
        tc_log!(warn, $domain, $($rest)*)
    };
}

macro_rules! tc_info {
    ($domain:ident, $($rest:tt)*) => {
        tc_log!(info, $domain, $($rest)*)
    };
}

macro_rules! tc_debug {
    ($domain:ident, $($rest:tt)*) => {
        tc_log!(debug, $domain, $($rest)*)
    };
}
