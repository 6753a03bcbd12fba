// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method-channel envelope.
//
// The host sends `{"method": "...", "arguments": {...}}` and receives one of
// three replies, mirroring the host framework's channel result callbacks:
//
//   {"status":"success","result":<value>}
//   {"status":"error","code":"<CODE>","message":"<text>"}
//   {"status":"notImplemented"}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use openmail_bridge::traits::PlatformBridge;
use openmail_core::error::MailBridgeError;

use crate::command::{CommandReply, MailCommand};
use crate::launcher::MailAppLauncher;

/// An incoming call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// The reply to a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    Success { result: Value },
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    pub fn from_error(err: &MailBridgeError) -> Self {
        match err {
            MailBridgeError::UnknownMethod(_) => Self::NotImplemented,
            other => Self::Error {
                code: other.code().to_string(),
                message: other.to_string(),
            },
        }
    }

    /// Encode for the host. Never fails: a serialization fault becomes an
    /// error response with a fixed message.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to encode method response");
            r#"{"status":"error","code":"SERIALIZATION_ERROR","message":"failed to encode response"}"#
                .to_string()
        })
    }
}

/// Decode, run and encode one call.
pub fn dispatch<B: PlatformBridge>(launcher: &MailAppLauncher<B>, call: &MethodCall) -> MethodResponse {
    let span = tracing::info_span!("method_call", method = %call.method);
    let _guard = span.enter();

    let outcome = MailCommand::from_method_call(&call.method, &call.arguments)
        .and_then(|command| launcher.handle(command))
        .and_then(CommandReply::into_value);

    match outcome {
        Ok(result) => MethodResponse::Success { result },
        Err(err @ MailBridgeError::UnknownMethod(_)) => {
            tracing::debug!(error = %err, "method not implemented");
            MethodResponse::from_error(&err)
        }
        Err(err) => {
            tracing::warn!(error = %err, code = err.code(), "method call failed");
            MethodResponse::from_error(&err)
        }
    }
}

/// [`dispatch`] over a JSON envelope, returning the JSON reply.
pub fn dispatch_json<B: PlatformBridge>(launcher: &MailAppLauncher<B>, envelope: &str) -> String {
    let response = match serde_json::from_str::<MethodCall>(envelope) {
        Ok(call) => dispatch(launcher, &call),
        Err(e) => {
            let err = MailBridgeError::InvalidEnvelope(e.to_string());
            tracing::warn!(error = %err, "rejecting method call envelope");
            MethodResponse::from_error(&err)
        }
    };
    response.to_json()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use openmail_bridge::intent::LaunchRequest;
    use openmail_bridge::memory::{InstalledApp, MemoryBridge};

    use super::*;
    use crate::command::methods;

    fn launcher() -> MailAppLauncher<MemoryBridge> {
        MailAppLauncher::new(MemoryBridge::with_apps([
            InstalledApp::mail_client("com.google.android.gm", "Gmail"),
            InstalledApp::mail_client("com.microsoft.office.outlook", "Outlook"),
        ]))
    }

    fn call(method: &str, arguments: Value) -> MethodResponse {
        dispatch(&launcher(), &MethodCall::new(method, arguments))
    }

    #[test]
    fn open_mail_app_succeeds_with_true() {
        assert_eq!(
            call(methods::OPEN_MAIL_APP, json!({"nativePickerTitle": "Pick"})),
            MethodResponse::Success {
                result: Value::Bool(true)
            }
        );
    }

    #[test]
    fn unknown_app_succeeds_with_false() {
        assert_eq!(
            call(methods::OPEN_SPECIFIC_MAIL_APP, json!({"name": "Nope"})),
            MethodResponse::Success {
                result: Value::Bool(false)
            }
        );
    }

    #[test]
    fn get_main_apps_returns_encoded_list() {
        let MethodResponse::Success {
            result: Value::String(encoded),
        } = call(methods::GET_MAIN_APPS, Value::Null)
        else {
            panic!("expected encoded string result");
        };
        let decoded: Vec<openmail_core::DiscoveredApp> = serde_json::from_str(&encoded).unwrap();
        let names: Vec<_> = decoded.into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Gmail", "Outlook"]);
    }

    #[test]
    fn malformed_payload_is_an_error_and_launches_nothing() {
        let launcher = launcher();
        let response = dispatch(
            &launcher,
            &MethodCall::new(
                methods::COMPOSE_IN_MAIL_APP,
                json!({"nativePickerTitle": "", "emailContent": "{\"to\":[]}"}),
            ),
        );
        match response {
            MethodResponse::Error { code, .. } => assert_eq!(code, "MALFORMED_PAYLOAD"),
            other => panic!("unexpected response: {other:?}"),
        }
        assert!(launcher.bridge().launches().unwrap().is_empty());
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        assert_eq!(
            call("deleteAllMail", json!({})),
            MethodResponse::NotImplemented
        );
    }

    #[test]
    fn response_wire_shapes() {
        assert_eq!(
            MethodResponse::Success {
                result: Value::Bool(true)
            }
            .to_json(),
            r#"{"status":"success","result":true}"#
        );
        assert_eq!(
            MethodResponse::NotImplemented.to_json(),
            r#"{"status":"notImplemented"}"#
        );
        assert_eq!(
            MethodResponse::from_error(&MailBridgeError::PlatformUnavailable).to_json(),
            r#"{"status":"error","code":"PLATFORM_UNAVAILABLE","message":"feature not available on this platform"}"#
        );
    }

    #[test]
    fn dispatch_json_compose_round() {
        let launcher = launcher();
        let envelope = json!({
            "method": methods::COMPOSE_IN_SPECIFIC_MAIL_APP,
            "arguments": {
                "name": "Outlook",
                "emailContent": r#"{"to":["a@x.com"],"cc":["c@x.com"],"bcc":[],"subject":"Hi","body":"Hello"}"#
            }
        })
        .to_string();

        assert_eq!(
            dispatch_json(&launcher, &envelope),
            r#"{"status":"success","result":true}"#
        );
        let launches = launcher.bridge().launches().unwrap();
        assert!(matches!(launches.as_slice(), [LaunchRequest::Direct(_)]));
    }

    #[test]
    fn envelope_without_arguments_is_accepted() {
        let reply = dispatch_json(&launcher(), r#"{"method":"getMainApps"}"#);
        assert!(reply.starts_with(r#"{"status":"success""#));
    }

    #[test]
    fn garbage_envelope_is_invalid_envelope_error() {
        let reply: MethodResponse =
            serde_json::from_str(&dispatch_json(&launcher(), "not json")).unwrap();
        match reply {
            MethodResponse::Error { code, .. } => assert_eq!(code, "INVALID_ENVELOPE"),
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
