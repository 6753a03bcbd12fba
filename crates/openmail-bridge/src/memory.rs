// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory registry and launcher.
//
// Substitutes the OS services in tests and host-side previews: apps are
// registered up front, queries answer from that list in insertion order, and
// every launch request is recorded instead of being started.

use std::sync::Mutex;

use openmail_core::error::{MailBridgeError, Result};

use crate::intent::{ComponentName, Intent, LaunchRequest, MailAction};
use crate::traits::*;

/// An app known to the in-memory registry.
#[derive(Debug, Clone)]
pub struct InstalledApp {
    pub package_name: String,
    pub activity_name: String,
    pub label: String,
    pub icon: i32,
    /// Actions this app declares an intent filter for.
    pub handles: Vec<MailAction>,
    /// Whether the package has a `MAIN`/`LAUNCHER` activity.
    pub launchable: bool,
}

impl InstalledApp {
    /// A launchable app handling both view and compose.
    pub fn mail_client(package_name: &str, label: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            activity_name: format!("{package_name}.MainActivity"),
            label: label.to_string(),
            icon: 0,
            handles: vec![MailAction::View, MailAction::SendTo],
            launchable: true,
        }
    }

    pub fn handling(mut self, handles: &[MailAction]) -> Self {
        self.handles = handles.to_vec();
        self
    }

    pub fn without_launcher(mut self) -> Self {
        self.launchable = false;
        self
    }

    pub fn with_icon(mut self, icon: i32) -> Self {
        self.icon = icon;
        self
    }

    fn resolved(&self) -> ResolvedActivity {
        ResolvedActivity {
            package_name: self.package_name.clone(),
            activity_name: self.activity_name.clone(),
            label: self.label.clone(),
            icon: self.icon,
        }
    }
}

/// Bridge backed by a fixed list of apps.
#[derive(Debug, Default)]
pub struct MemoryBridge {
    apps: Vec<InstalledApp>,
    launches: Mutex<Vec<LaunchRequest>>,
}

impl MemoryBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apps(apps: impl IntoIterator<Item = InstalledApp>) -> Self {
        Self {
            apps: apps.into_iter().collect(),
            launches: Mutex::new(Vec::new()),
        }
    }

    /// Every launch request issued so far, oldest first.
    pub fn launches(&self) -> Result<Vec<LaunchRequest>> {
        Ok(self.lock_launches()?.clone())
    }

    fn lock_launches(&self) -> Result<std::sync::MutexGuard<'_, Vec<LaunchRequest>>> {
        self.launches
            .lock()
            .map_err(|_| MailBridgeError::Bridge("launch log lock poisoned".into()))
    }
}

impl PlatformBridge for MemoryBridge {
    fn platform_name(&self) -> &str {
        "In-memory"
    }
}

impl AppRegistry for MemoryBridge {
    fn query_activities(&self, action: MailAction) -> Result<Vec<ResolvedActivity>> {
        Ok(self
            .apps
            .iter()
            .filter(|app| app.handles.contains(&action))
            .map(InstalledApp::resolved)
            .collect())
    }

    fn launch_intent_for_package(&self, package_name: &str) -> Result<Option<Intent>> {
        Ok(self
            .apps
            .iter()
            .find(|app| app.package_name == package_name && app.launchable)
            .map(|app| {
                Intent::main_entry(ComponentName::new(&app.package_name, &app.activity_name))
            }))
    }
}

impl ActivityLauncher for MemoryBridge {
    fn start_activity(&self, request: &LaunchRequest) -> Result<()> {
        tracing::debug!(?request, "MemoryBridge: recording launch");
        self.lock_launches()?.push(request.clone());
        Ok(())
    }
}
