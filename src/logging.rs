use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const ENV_LOG_FILTER: &str = "LOGCOST_LOG";
const ENV_LOG_DIR: &str = "LOGCOST_LOG_DIR";
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "logcost.log";

/// Installs the global subscriber: stderr always, plus a daily rolling file when
/// `LOGCOST_LOG_DIR` is set. Keep the returned guard alive until exit so the
/// file writer flushes.
pub fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match std::env::var(ENV_LOG_DIR) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir.trim(), LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}
