// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed commands decoded from host method calls.
//
// The method name is resolved exactly once, here; everything downstream
// matches on `MailCommand` instead of strings.

use serde_json::Value;

use openmail_core::error::{MailBridgeError, Result};
use openmail_core::types::{ComposeRequest, DiscoveredApp, encode_app_list};

/// Method names used by the host-side package.
pub mod methods {
    pub const OPEN_MAIL_APP: &str = "openMailApp";
    pub const OPEN_SPECIFIC_MAIL_APP: &str = "openSpecificMailApp";
    pub const COMPOSE_IN_MAIL_APP: &str = "composeNewEmailInMailApp";
    pub const COMPOSE_IN_SPECIFIC_MAIL_APP: &str = "composeNewEmailInSpecificMailApp";
    pub const GET_MAIN_APPS: &str = "getMainApps";
}

const ARG_PICKER_TITLE: &str = "nativePickerTitle";
const ARG_NAME: &str = "name";
const ARG_EMAIL_CONTENT: &str = "emailContent";

/// One request from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailCommand {
    /// Show the chooser of inbox-capable apps.
    OpenMailApp { native_picker_title: String },
    /// Open the app whose label equals `name`.
    OpenSpecificMailApp { name: String },
    /// Compose in the first compose-capable app, behind a chooser.
    ComposeNewEmailInMailApp {
        native_picker_title: String,
        email_content: ComposeRequest,
    },
    /// Compose directly in the app whose label equals `name`.
    ComposeNewEmailInSpecificMailApp {
        name: String,
        email_content: ComposeRequest,
    },
    /// List the labels of inbox-capable apps.
    GetMainApps,
}

impl MailCommand {
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::OpenMailApp { .. } => methods::OPEN_MAIL_APP,
            Self::OpenSpecificMailApp { .. } => methods::OPEN_SPECIFIC_MAIL_APP,
            Self::ComposeNewEmailInMailApp { .. } => methods::COMPOSE_IN_MAIL_APP,
            Self::ComposeNewEmailInSpecificMailApp { .. } => methods::COMPOSE_IN_SPECIFIC_MAIL_APP,
            Self::GetMainApps => methods::GET_MAIN_APPS,
        }
    }

    /// Resolve a method call into a command.
    ///
    /// Absent string arguments read as `""`, matching what the host package
    /// has always relied on. `emailContent` must be present and must decode
    /// strictly.
    pub fn from_method_call(method: &str, arguments: &Value) -> Result<Self> {
        match method {
            methods::OPEN_MAIL_APP => Ok(Self::OpenMailApp {
                native_picker_title: string_arg(arguments, ARG_PICKER_TITLE)?,
            }),
            methods::OPEN_SPECIFIC_MAIL_APP => Ok(Self::OpenSpecificMailApp {
                name: string_arg(arguments, ARG_NAME)?,
            }),
            methods::COMPOSE_IN_MAIL_APP => Ok(Self::ComposeNewEmailInMailApp {
                native_picker_title: string_arg(arguments, ARG_PICKER_TITLE)?,
                email_content: email_content_arg(arguments)?,
            }),
            methods::COMPOSE_IN_SPECIFIC_MAIL_APP => Ok(Self::ComposeNewEmailInSpecificMailApp {
                name: string_arg(arguments, ARG_NAME)?,
                email_content: email_content_arg(arguments)?,
            }),
            methods::GET_MAIN_APPS => Ok(Self::GetMainApps),
            other => Err(MailBridgeError::UnknownMethod(other.to_string())),
        }
    }
}

fn string_arg(arguments: &Value, name: &str) -> Result<String> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(MailBridgeError::InvalidArgument {
            name: name.to_string(),
            expected: "a string",
        }),
    }
}

fn email_content_arg(arguments: &Value) -> Result<ComposeRequest> {
    match arguments.get(ARG_EMAIL_CONTENT) {
        Some(Value::String(payload)) => ComposeRequest::decode(payload),
        None | Some(Value::Null) => Err(MailBridgeError::MalformedPayload(format!(
            "missing `{ARG_EMAIL_CONTENT}`"
        ))),
        Some(_) => Err(MailBridgeError::MalformedPayload(format!(
            "`{ARG_EMAIL_CONTENT}` must be an encoded JSON string"
        ))),
    }
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// Whether a launch request was issued.
    Launched(bool),
    MailApps(Vec<DiscoveredApp>),
}

impl CommandReply {
    /// Channel representation: a bool, or the app list encoded as a JSON
    /// string (the host decodes it a second time).
    pub fn into_value(self) -> Result<Value> {
        match self {
            Self::Launched(opened) => Ok(Value::Bool(opened)),
            Self::MailApps(apps) => Ok(Value::String(encode_app_list(&apps)?)),
        }
    }
}
