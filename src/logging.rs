//! Structured logging configuration.
//!
//! Initializes a `tracing` subscriber with:
//! - `RUST_LOG` environment filter support
//! - Default level: INFO for this crate
//! - JSON output when `RUST_LOG_FORMAT=json`
//! - Human-readable output otherwise
//!
//! Logs always go to stderr so stdout stays reserved for predictions.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "movie_genre_classifier=info";

/// Whether a `RUST_LOG_FORMAT` value asks for JSON lines.
fn wants_json(format: Option<&str>) -> bool {
    format.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

/// Initialize the global tracing subscriber.
///
/// Call this once at program startup. Subsequent calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let is_json = wants_json(std::env::var("RUST_LOG_FORMAT").ok().as_deref());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if is_json {
        let _ = subscriber.json().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init();
        init();
    }

    #[test]
    fn test_default_filter_targets_this_crate() {
        // library events are emitted under the crate name; the binaries rely on it
        assert_eq!(DEFAULT_FILTER.split('=').next(), Some(env!("CARGO_CRATE_NAME")));
        let filter = EnvFilter::new(DEFAULT_FILTER);
        assert!(format!("{filter:?}").contains("movie_genre_classifier"));
    }

    #[test]
    fn test_json_format_selection() {
        assert!(wants_json(Some("json")));
        assert!(wants_json(Some("JSON ")));
        assert!(!wants_json(Some("pretty")));
        assert!(!wants_json(Some("")));
        assert!(!wants_json(None));
    }
}
