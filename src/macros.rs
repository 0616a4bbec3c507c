/// Logs through the process-wide logger at the given [`Level`](crate::Level).
///
/// Failures are reported by the logger itself and otherwise discarded; call
/// [`global::log`](crate::global::log) to get the result.
///
/// ```
/// debuglog::log!(debuglog::Level::Info, "value={}", 42);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        {
            let _ = $crate::global::log($level, ::std::format_args!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Fatal, $($arg)+)
    };
}
