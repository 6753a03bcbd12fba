// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Builders for the intents the launcher issues.

use openmail_bridge::intent::{
    ACTION_SENDTO, ComponentName, EXTRA_BCC, EXTRA_CC, EXTRA_EMAIL, EXTRA_SUBJECT, EXTRA_TEXT,
    ExtraValue, Intent, LabeledIntent, MAILTO,
};
use openmail_bridge::traits::ResolvedActivity;
use openmail_core::types::ComposeRequest;

/// A `SENDTO mailto:` intent scoped to `target`'s component with the
/// request's fields as extras.
///
/// `cc` and `bcc` are always attached, empty or not.
pub fn compose_intent(target: &ResolvedActivity, request: &ComposeRequest, mime_type: &str) -> Intent {
    Intent::new(ACTION_SENDTO)
        .with_data(MAILTO)
        .with_mime_type(mime_type)
        .with_component(ComponentName::new(
            &target.package_name,
            &target.activity_name,
        ))
        .with_extra(EXTRA_EMAIL, ExtraValue::TextArray(request.to.clone()))
        .with_extra(EXTRA_CC, ExtraValue::TextArray(request.cc.clone()))
        .with_extra(EXTRA_BCC, ExtraValue::TextArray(request.bcc.clone()))
        .with_extra(EXTRA_SUBJECT, ExtraValue::Text(request.subject.clone()))
        .with_extra(EXTRA_TEXT, ExtraValue::Text(request.body.clone()))
}

/// Chooser alternative that opens `activity`'s app through `launch`.
pub fn labeled_alternative(activity: &ResolvedActivity, launch: Intent) -> LabeledIntent {
    LabeledIntent {
        intent: launch,
        source_package: activity.package_name.clone(),
        label: activity.label.clone(),
        icon: activity.icon,
    }
}

/// First activity whose label is exactly `name`.
///
/// Labels are OS-localized, so the same app may need a different `name` on
/// devices with another locale.
pub fn find_by_label<'a>(
    activities: &'a [ResolvedActivity],
    name: &str,
) -> Option<&'a ResolvedActivity> {
    activities.iter().find(|activity| activity.label == name)
}
