// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where the Android registry is unavailable.
//
// Every trait method returns `PlatformUnavailable`; the real implementation
// lives in the `android` module.

use openmail_core::error::{MailBridgeError, Result};

use crate::intent::{Intent, LaunchRequest, MailAction};
use crate::traits::*;

/// No-op bridge returned on non-Android platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl AppRegistry for StubBridge {
    fn query_activities(&self, action: MailAction) -> Result<Vec<ResolvedActivity>> {
        tracing::warn!(%action, "AppRegistry::query_activities called on stub bridge");
        Err(MailBridgeError::PlatformUnavailable)
    }

    fn launch_intent_for_package(&self, _package_name: &str) -> Result<Option<Intent>> {
        Err(MailBridgeError::PlatformUnavailable)
    }
}

impl ActivityLauncher for StubBridge {
    fn start_activity(&self, _request: &LaunchRequest) -> Result<()> {
        tracing::warn!("ActivityLauncher::start_activity called on stub bridge");
        Err(MailBridgeError::PlatformUnavailable)
    }
}
