//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingSettings;

/// Installs the global subscriber. Keep the returned guard alive for the
/// lifetime of the process when logging to files, or buffered lines are lost.
pub fn init_telemetry(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let (writer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "desk-server.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    if settings.json {
        registry.with(fmt::layer().json().with_writer(writer)).init();
    } else {
        registry.with(fmt::layer().with_writer(writer)).init();
    }

    guard
}
