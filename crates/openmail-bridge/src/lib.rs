// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OpenMail — Native platform bridge abstractions.
//
// This crate defines the traits through which the launcher queries the OS
// application registry and asks the OS to start activities, a
// platform-neutral model of Android intents, and the per-platform
// implementations of those traits.

pub mod intent;
pub mod memory;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

/// Retrieves the bridge implementation for the target operating system.
///
/// RETURNS: A boxed trait object (`dyn PlatformBridge`) that abstracts away
/// the underlying native SDK details.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: Uses `jni-rs` to invoke PackageManager and startActivity.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: every registry call reports PlatformUnavailable.
        Box::new(stub::StubBridge)
    }
}
