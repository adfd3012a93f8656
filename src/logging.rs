// Each level is compiled in only when its feature is enabled.
// Disabled levels still type-check their arguments.

#[cfg(feature = "log-info")]
macro_rules! info {
    ($($arg:tt)+) => (log::info!(target: "multicast_event", $($arg)+))
}

#[cfg(not(feature = "log-info"))]
macro_rules! info {
    ($($arg:tt)+) => {{
        if false {
            let _ = format_args!($($arg)+);
        }
    }};
}

#[cfg(feature = "log-error")]
macro_rules! error {
    ($($arg:tt)+) => (log::error!(target: "multicast_event", $($arg)+))
}

#[cfg(not(feature = "log-error"))]
macro_rules! error {
    ($($arg:tt)+) => {{
        if false {
            let _ = format_args!($($arg)+);
        }
    }};
}

