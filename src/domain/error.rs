// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation failed for field {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Route has no legs")]
    EmptyRoute,

    #[error("Leg/template mismatch: {legs} legs, {templates} call templates")]
    LegTemplateMismatch { legs: usize, templates: usize },

    #[error("Leg {leg} needs native wrapping but no deposit template was supplied")]
    MissingWrapTemplate { leg: usize },

    #[error("Only one leg may wrap native, found {count}")]
    MultipleWrapLegs { count: usize },

    #[error("Encoding error: {what} not found in call data")]
    PatternNotFound { what: String },

    #[error("Encoding error: {what} found at byte {index}, inside the leading ABI padding")]
    MisalignedAddress { what: String, index: usize },

    #[error("Field {field} overflow: {value} does not fit in {width} bytes")]
    FieldOverflow {
        field: &'static str,
        value: String,
        width: usize,
    },

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}
