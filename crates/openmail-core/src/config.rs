// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MailBridgeError, Result};

/// Settings for the launcher, stored as JSON next to the host app's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Chooser title used when the caller passes an empty one.
    /// `None` passes the empty title through to the OS.
    pub fallback_chooser_title: Option<String>,
    /// MIME type set on compose intents.
    pub compose_mime_type: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            fallback_chooser_title: None,
            compose_mime_type: "text/plain".into(),
        }
    }
}

impl BridgeConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MailBridgeError::Config(e.to_string()))
    }

    /// Load a config file written by [`BridgeConfig::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Title to show on a chooser, given what the caller asked for.
    pub fn chooser_title<'a>(&'a self, requested: &'a str) -> &'a str {
        match (&self.fallback_chooser_title, requested.is_empty()) {
            (Some(fallback), true) => fallback.as_str(),
            _ => requested,
        }
    }
}
