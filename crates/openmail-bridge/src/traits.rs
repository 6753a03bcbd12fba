// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the two OS services OpenMail
// consumes: the application registry and the activity launcher.

use openmail_core::error::Result;

use crate::intent::{Intent, LaunchRequest, MailAction};

/// Unified bridge handed to the launcher at construction.
///
/// Platforms without an application registry return
/// `MailBridgeError::PlatformUnavailable` from the stub implementation.
pub trait PlatformBridge: AppRegistry + ActivityLauncher + Send + Sync {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;
}

/// Read-only view of the installed applications.
pub trait AppRegistry {
    /// Activities that declare support for `action` on `mailto:`, in the
    /// registry's native enumeration order.
    fn query_activities(&self, action: MailAction) -> Result<Vec<ResolvedActivity>>;

    /// The main entry point of `package_name`, if it exposes one.
    fn launch_intent_for_package(&self, package_name: &str) -> Result<Option<Intent>>;
}

/// Foreground activity launch.
pub trait ActivityLauncher {
    /// Ask the OS to start the request. Returns once the request has been
    /// issued; the launched app's lifecycle is not observed.
    fn start_activity(&self, request: &LaunchRequest) -> Result<()>;
}

impl<T: PlatformBridge + ?Sized> PlatformBridge for Box<T> {
    fn platform_name(&self) -> &str {
        (**self).platform_name()
    }
}

impl<T: AppRegistry + ?Sized> AppRegistry for Box<T> {
    fn query_activities(&self, action: MailAction) -> Result<Vec<ResolvedActivity>> {
        (**self).query_activities(action)
    }

    fn launch_intent_for_package(&self, package_name: &str) -> Result<Option<Intent>> {
        (**self).launch_intent_for_package(package_name)
    }
}

impl<T: ActivityLauncher + ?Sized> ActivityLauncher for Box<T> {
    fn start_activity(&self, request: &LaunchRequest) -> Result<()> {
        (**self).start_activity(request)
    }
}

// ---------------------------------------------------------------------------
// Registry entries
// ---------------------------------------------------------------------------

/// One `ResolveInfo` returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedActivity {
    pub package_name: String,
    /// Fully-qualified activity class name.
    pub activity_name: String,
    /// OS-localized label, as shown to the user.
    pub label: String,
    /// Icon resource id; 0 when the entry has none of its own.
    pub icon: i32,
}
