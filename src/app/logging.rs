// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::error::AppError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Expand a bare level ("debug") into a directive that keeps dependency noise down.
/// Directive strings (with ',' or '=') are passed through untouched.
pub fn filter_spec(log_level: &str) -> String {
    let normalized = log_level.trim();
    if normalized.is_empty() {
        return "info".to_string();
    }
    if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else {
        format!("{normalized},alloy_sol_types=info,config=warn")
    }
}

pub fn setup_logging(log_level: &str, json_format: bool) -> Result<(), AppError> {
    let spec = filter_spec(log_level);
    let filter = EnvFilter::try_new(&spec)
        .map_err(|e| AppError::Config(format!("Invalid log filter {spec:?}: {e}")))?;
    let subscriber = tracing_subscriber::registry().with(filter);

    // Payload hex goes to stdout, so logs stay on stderr.
    let result = if json_format {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init()
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .compact(),
            )
            .try_init()
    };
    result.map_err(|e| AppError::Config(format!("Logging already initialized: {e}")))?;

    tracing::debug!(
        filter = %spec,
        format = if json_format { "json" } else { "compact" },
        "Logging initialized"
    );
    Ok(())
}
