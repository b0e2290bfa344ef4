//! Logging Infrastructure
//!
//! Console logging always; when a log directory is configured, daily rotating
//! application logs under `<dir>/app` and security events under `<dir>/security`.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Prepare the log directory layout and return the two file appenders
/// (application, security).
pub fn create_file_appenders(
    log_dir: &Path,
) -> anyhow::Result<(RollingFileAppender, RollingFileAppender)> {
    let app_log_dir = log_dir.join("app");
    let security_log_dir = log_dir.join("security");
    fs::create_dir_all(&app_log_dir)?;
    fs::create_dir_all(&security_log_dir)?;

    let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
    let security_log = RollingFileAppender::new(Rotation::DAILY, security_log_dir, "security");
    Ok((app_log, security_log))
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Examples
/// ```no_run
/// // Development (console only)
/// bistro_server::init_logger("debug", false, None)?;
///
/// // Production (JSON console + files)
/// bistro_server::init_logger("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let Some(dir) = log_dir else {
        subscriber.with(console_layer).try_init()?;
        return Ok(());
    };

    let (app_log, security_log) = create_file_appenders(Path::new(dir))?;

    // Only log to the app file if target is NOT "security"
    let app_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(app_log))
        .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target() != "security"
        }));

    let security_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::sync::Mutex::new(security_log))
        .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target() == "security"
        }));

    subscriber
        .with(console_layer)
        .with(app_layer)
        .with(security_layer)
        .try_init()?;

    Ok(())
}

/// Security log helper - records authentication and authorization events
/// under the `security` target.
///
/// # Examples
/// ```no_run
/// bistro_server::security_log!(WARN, "auth_failed", email = "chef@example.com");
/// bistro_server::security_log!(INFO, "login", user_id = "42");
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_file_appenders_builds_layout() {
        let dir = tempfile::tempdir().unwrap();
        let result = create_file_appenders(dir.path());
        assert!(result.is_ok());
        assert!(dir.path().join("app").is_dir());
        assert!(dir.path().join("security").is_dir());
    }
}
