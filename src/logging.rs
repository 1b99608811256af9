// src/logging.rs

use crate::errors::{DraftError, DraftResult};
use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};
use log::info;
use std::path::Path;

/// Starts the file logger. The terminal belongs to the UI, so nothing is
/// ever written to stdout/stderr. Keep the returned handle alive.
pub fn init_logging(log_dir: &Path, level: &str) -> DraftResult<LoggerHandle> {
    std::fs::create_dir_all(log_dir)?;

    Logger::try_with_str(level)
        .map_err(|e| DraftError::config_error(format!("Invalid log level '{}': {}", level, e)))?
        .log_to_file(FileSpec::default().directory(log_dir).basename("draftwise"))
        .write_mode(WriteMode::BufferAndFlush)
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|e| DraftError::config_error(format!("Failed to start logger: {}", e)))
}

/// Logs one completion call.
pub fn log_api_call(log: &ApiCallLog) {
    info!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );
}
