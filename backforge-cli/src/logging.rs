//! Diagnostic logging to stderr
//!
//! User-facing output goes to stdout through `console`; tracing events are
//! for diagnostics only and stay quiet unless asked for.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count
#[must_use]
pub const fn directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the verbosity flag when set. Calling this twice is
/// harmless; the second call leaves the first subscriber in place.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_by_default() {
        assert_eq!(directive(0), "warn");
    }

    #[test]
    fn test_verbosity_escalates() {
        assert_eq!(directive(1), "info");
        assert_eq!(directive(2), "debug");
        assert_eq!(directive(3), "trace");
        assert_eq!(directive(u8::MAX), "trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(2);
    }
}
