// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for OpenMail.
//
// "No qualifying application" is deliberately absent: operations report it
// as `Ok(false)` (or an empty list), never as an error.

use thiserror::Error;

/// Top-level error type for all OpenMail operations.
#[derive(Debug, Error)]
pub enum MailBridgeError {
    // -- Caller input --
    #[error("malformed email content: {0}")]
    MalformedPayload(String),

    #[error("argument `{name}` must be {expected}")]
    InvalidArgument { name: String, expected: &'static str },

    #[error("method not implemented: {0}")]
    UnknownMethod(String),

    #[error("invalid method call envelope: {0}")]
    InvalidEnvelope(String),

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl MailBridgeError {
    /// Stable error code reported to the host over the method channel.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::UnknownMethod(_) => "UNKNOWN_METHOD",
            Self::InvalidEnvelope(_) => "INVALID_ENVELOPE",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Bridge(_) => "BRIDGE_ERROR",
            Self::PlatformUnavailable => "PLATFORM_UNAVAILABLE",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MailBridgeError>;
