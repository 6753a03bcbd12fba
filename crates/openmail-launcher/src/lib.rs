// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OpenMail — Mail-app launcher.
//
// Decodes host method calls into typed commands, runs them against an
// injected platform bridge, and encodes the reply for the method channel.

pub mod channel;
pub mod command;
pub mod intents;
pub mod launcher;
pub mod logging;

#[cfg(target_os = "android")]
pub mod android;

pub use channel::{MethodCall, MethodResponse, dispatch, dispatch_json};
pub use command::{CommandReply, MailCommand};
pub use launcher::MailAppLauncher;
