// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-neutral model of the Android intents the launcher issues.
//
// The launcher builds these values; the Android bridge translates them into
// `android.content.Intent` objects just before `startActivity`. Keeping the
// description in Rust lets tests inspect exactly what would be launched.

// ---------------------------------------------------------------------------
// Android constants
// ---------------------------------------------------------------------------

pub const ACTION_VIEW: &str = "android.intent.action.VIEW";
pub const ACTION_SENDTO: &str = "android.intent.action.SENDTO";
pub const ACTION_MAIN: &str = "android.intent.action.MAIN";

pub const CATEGORY_LAUNCHER: &str = "android.intent.category.LAUNCHER";

pub const EXTRA_EMAIL: &str = "android.intent.extra.EMAIL";
pub const EXTRA_CC: &str = "android.intent.extra.CC";
pub const EXTRA_BCC: &str = "android.intent.extra.BCC";
pub const EXTRA_SUBJECT: &str = "android.intent.extra.SUBJECT";
pub const EXTRA_TEXT: &str = "android.intent.extra.TEXT";
pub const EXTRA_INITIAL_INTENTS: &str = "android.intent.extra.INITIAL_INTENTS";

/// `Intent.FLAG_ACTIVITY_NEW_TASK`: required when starting an activity from
/// a non-Activity context (the plugin only holds the application context).
pub const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

/// Data URI shared by every mail intent.
pub const MAILTO: &str = "mailto:";

/// The two capabilities the registry is queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MailAction {
    /// `ACTION_VIEW` on `mailto:`: apps that can open an inbox.
    View,
    /// `ACTION_SENDTO` on `mailto:`: apps that can compose a message.
    SendTo,
}

impl MailAction {
    pub fn intent_action(&self) -> &'static str {
        match self {
            Self::View => ACTION_VIEW,
            Self::SendTo => ACTION_SENDTO,
        }
    }

    /// The query intent handed to `PackageManager.queryIntentActivities`.
    pub fn query_intent(&self) -> Intent {
        Intent::new(self.intent_action()).with_data(MAILTO)
    }
}

impl std::fmt::Display for MailAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.intent_action())
    }
}

/// Explicit `package/class` target of an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentName {
    pub package_name: String,
    pub class_name: String,
}

impl ComponentName {
    pub fn new(package_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            class_name: class_name.into(),
        }
    }
}

/// Value of an intent extra. Only the shapes the mail intents need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraValue {
    Text(String),
    TextArray(Vec<String>),
}

/// An `android.content.Intent`, minus everything OpenMail never sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    pub action: Option<String>,
    pub data: Option<String>,
    pub mime_type: Option<String>,
    pub component: Option<ComponentName>,
    pub categories: Vec<String>,
    /// Extras in insertion order.
    pub extras: Vec<(String, ExtraValue)>,
    pub flags: i32,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Default::default()
        }
    }

    /// The intent `getLaunchIntentForPackage` would return for `component`.
    pub fn main_entry(component: ComponentName) -> Self {
        Self::new(ACTION_MAIN)
            .with_category(CATEGORY_LAUNCHER)
            .with_component(component)
    }

    pub fn with_data(mut self, uri: impl Into<String>) -> Self {
        self.data = Some(uri.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_component(mut self, component: ComponentName) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Add or replace an extra, like `Intent.putExtra`.
    pub fn with_extra(mut self, key: impl Into<String>, value: ExtraValue) -> Self {
        let key = key.into();
        match self.extras.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.extras.push((key, value)),
        }
        self
    }

    pub fn with_flags(mut self, flags: i32) -> Self {
        self.flags |= flags;
        self
    }

    pub fn extra(&self, key: &str) -> Option<&ExtraValue> {
        self.extras.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// A chooser alternative: `android.content.pm.LabeledIntent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledIntent {
    pub intent: Intent,
    pub source_package: String,
    pub label: String,
    /// Icon resource id inside `source_package`; 0 means none.
    pub icon: i32,
}

/// What the launcher asks the OS to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchRequest {
    /// Start `intent` directly.
    Direct(Intent),
    /// Present the system chooser with `target` as the default entry and
    /// `alternatives` as `EXTRA_INITIAL_INTENTS`. `flags` apply to the
    /// chooser intent itself.
    Chooser {
        title: String,
        target: Intent,
        alternatives: Vec<LabeledIntent>,
        flags: i32,
    },
}

impl LaunchRequest {
    /// The intent that ends up at the default position.
    pub fn primary_intent(&self) -> &Intent {
        match self {
            Self::Direct(intent) => intent,
            Self::Chooser { target, .. } => target,
        }
    }
}
