// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data-transfer types exchanged with the host framework.
//
// Both types are plain values that live for a single call. The JSON field
// names are fixed by the host-side package and must not be renamed.

use serde::{Deserialize, Serialize};

use crate::error::{MailBridgeError, Result};

/// An installed application that can handle `mailto:` links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredApp {
    /// OS-localized display label.
    pub name: String,
}

impl DiscoveredApp {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Encode a list of discovered apps as the JSON array the host expects.
pub fn encode_app_list(apps: &[DiscoveredApp]) -> Result<String> {
    Ok(serde_json::to_string(apps)?)
}

/// A message to pre-fill in the native compose screen.
///
/// Addresses are passed through to the mail app untouched; no format
/// validation happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposeRequest {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl ComposeRequest {
    /// Decode the caller's JSON payload.
    ///
    /// Every field is required and unknown fields are rejected, so a
    /// truncated payload fails here instead of launching a half-filled
    /// compose screen.
    pub fn decode(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| MailBridgeError::MalformedPayload(e.to_string()))
    }
}
