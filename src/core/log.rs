use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// fxwatch logs at debug when verbose, errors otherwise. HTTP client crates
/// are capped at warn so a verbose run stays readable.
pub fn app_targets(verbose: bool) -> Targets {
    let app_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::ERROR
    };
    Targets::new()
        .with_target("fxwatch", app_level)
        .with_default(LevelFilter::WARN.min(app_level))
}

pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "error" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries rate tables and conversions.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_targets(verbose))
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_verbose_targets() {
        let targets = app_targets(true);
        assert!(targets.would_enable("fxwatch::exchange", &Level::DEBUG));
        assert!(!targets.would_enable("fxwatch::exchange", &Level::TRACE));
        assert!(targets.would_enable("reqwest::connect", &Level::WARN));
        assert!(!targets.would_enable("reqwest::connect", &Level::DEBUG));
    }

    #[test]
    fn test_quiet_targets() {
        let targets = app_targets(false);
        assert!(targets.would_enable("fxwatch::selection", &Level::ERROR));
        assert!(!targets.would_enable("fxwatch::selection", &Level::WARN));
        assert!(!targets.would_enable("hyper", &Level::WARN));
    }
}
