//! Logging initialization
//!
//! Logging starts from the command-line flags before any config is read, so
//! config discovery is visible with `-v`. Once the config is loaded its
//! verbosity and format are applied through reload handles.

use crate::config::LogFormat;
use tracing::warn;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Layer, Registry};

type FormatLayer = Box<dyn Layer<Registry> + Send + Sync>;
type FormatSubscriber = Layered<reload::Layer<FormatLayer, Registry>, Registry>;

/// Handles for adjusting logging after startup
pub struct LogHandle {
    format: reload::Handle<FormatLayer, Registry>,
    filter: reload::Handle<EnvFilter, FormatSubscriber>,
}

impl LogHandle {
    /// Switch to the given verbosity and output format
    pub fn apply(&self, verbose: bool, format: LogFormat) {
        if let Err(e) = self.format.reload(format_layer(format)) {
            warn!("Failed to switch log format: {}", e);
        }
        if let Err(e) = self.filter.reload(env_filter(verbose)) {
            warn!("Failed to change log level: {}", e);
        }
    }
}

/// Install the global subscriber: text output, debug when `verbose`
pub fn init(verbose: bool) -> LogHandle {
    let (format_reload, format) = reload::Layer::new(format_layer(LogFormat::Text));
    let (filter_reload, filter) = reload::Layer::new(env_filter(verbose));

    tracing_subscriber::registry()
        .with(format_reload)
        .with(filter_reload)
        .init();

    LogHandle { format, filter }
}

/// 0 = info, verbose = debug
fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("ci_once=debug")
    } else {
        EnvFilter::new("ci_once=info")
    }
}

fn format_layer(format: LogFormat) -> FormatLayer {
    let layer = fmt::layer().with_target(false).without_time();
    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

