// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The five launcher operations.
//
// Every operation is one best-effort pass against the live registry. When no
// installed app qualifies (or the matched app has no entry point) the result
// is `Ok(false)` and nothing is launched; `Err` means the platform itself
// failed.

use openmail_bridge::intent::{FLAG_ACTIVITY_NEW_TASK, LaunchRequest, MailAction};
use openmail_bridge::traits::PlatformBridge;
use openmail_core::config::BridgeConfig;
use openmail_core::error::Result;
use openmail_core::types::{ComposeRequest, DiscoveredApp};
use tracing::{debug, info, warn};

use crate::command::{CommandReply, MailCommand};
use crate::intents::{compose_intent, find_by_label, labeled_alternative};

/// Launches and lists mail apps through an injected platform bridge.
pub struct MailAppLauncher<B = Box<dyn PlatformBridge>> {
    bridge: B,
    config: BridgeConfig,
}

impl MailAppLauncher {
    /// Launcher backed by the bridge for the current target OS.
    pub fn for_platform(config: BridgeConfig) -> Self {
        Self::with_config(openmail_bridge::platform_bridge(), config)
    }
}

impl<B: PlatformBridge> MailAppLauncher<B> {
    pub fn new(bridge: B) -> Self {
        Self::with_config(bridge, BridgeConfig::default())
    }

    pub fn with_config(bridge: B, config: BridgeConfig) -> Self {
        Self { bridge, config }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run a decoded command.
    pub fn handle(&self, command: MailCommand) -> Result<CommandReply> {
        match command {
            MailCommand::OpenMailApp {
                native_picker_title,
            } => self
                .open_default_mail_app(&native_picker_title)
                .map(CommandReply::Launched),
            MailCommand::OpenSpecificMailApp { name } => self
                .open_specific_mail_app(&name)
                .map(CommandReply::Launched),
            MailCommand::ComposeNewEmailInMailApp {
                native_picker_title,
                email_content,
            } => self
                .compose_in_default_mail_app(&native_picker_title, &email_content)
                .map(CommandReply::Launched),
            MailCommand::ComposeNewEmailInSpecificMailApp {
                name,
                email_content,
            } => self
                .compose_in_specific_mail_app(&name, &email_content)
                .map(CommandReply::Launched),
            MailCommand::GetMainApps => self.list_mail_apps().map(CommandReply::MailApps),
        }
    }

    /// Present the system chooser over every app that can open `mailto:`.
    ///
    /// The first app the registry enumerates is the chooser's default entry;
    /// each remaining app with a launch entry point becomes a labeled
    /// alternative.
    pub fn open_default_mail_app(&self, chooser_title: &str) -> Result<bool> {
        let activities = self.bridge.query_activities(MailAction::View)?;
        let Some((first, rest)) = activities.split_first() else {
            info!("no installed app handles mailto:");
            return Ok(false);
        };

        let Some(target) = self.bridge.launch_intent_for_package(&first.package_name)? else {
            warn!(
                package = %first.package_name,
                "first mail app has no launch entry point"
            );
            return Ok(false);
        };

        let mut alternatives = Vec::with_capacity(rest.len());
        for activity in rest {
            match self.bridge.launch_intent_for_package(&activity.package_name)? {
                Some(launch) => alternatives.push(labeled_alternative(activity, launch)),
                None => debug!(
                    package = %activity.package_name,
                    "skipping chooser alternative without launch entry point"
                ),
            }
        }

        let request = LaunchRequest::Chooser {
            title: self.config.chooser_title(chooser_title).to_string(),
            target,
            alternatives,
            flags: FLAG_ACTIVITY_NEW_TASK,
        };
        self.bridge.start_activity(&request)?;

        info!(
            default_app = %first.label,
            candidates = activities.len(),
            "mail app chooser launched"
        );
        Ok(true)
    }

    /// Open the inbox of the app labeled exactly `name`, without a chooser.
    pub fn open_specific_mail_app(&self, name: &str) -> Result<bool> {
        let activities = self.bridge.query_activities(MailAction::View)?;
        let Some(activity) = find_by_label(&activities, name) else {
            info!(label = name, "no mail app with this label");
            return Ok(false);
        };

        let Some(launch) = self.bridge.launch_intent_for_package(&activity.package_name)? else {
            warn!(
                label = name,
                package = %activity.package_name,
                "mail app has no launch entry point"
            );
            return Ok(false);
        };

        self.bridge
            .start_activity(&LaunchRequest::Direct(launch.with_flags(FLAG_ACTIVITY_NEW_TASK)))?;

        info!(label = name, package = %activity.package_name, "mail app launched");
        Ok(true)
    }

    /// Pre-fill a message in the first compose-capable app, behind a chooser.
    ///
    /// `Ok(true)` means the launch was issued, not that anything was sent.
    pub fn compose_in_default_mail_app(
        &self,
        chooser_title: &str,
        request: &ComposeRequest,
    ) -> Result<bool> {
        let activities = self.bridge.query_activities(MailAction::SendTo)?;
        let Some(first) = activities.first() else {
            info!("no installed app handles mailto: compose");
            return Ok(false);
        };

        let launch = LaunchRequest::Chooser {
            title: self.config.chooser_title(chooser_title).to_string(),
            target: compose_intent(first, request, &self.config.compose_mime_type),
            alternatives: Vec::new(),
            flags: FLAG_ACTIVITY_NEW_TASK,
        };
        self.bridge.start_activity(&launch)?;

        info!(
            label = %first.label,
            recipients = request.to.len(),
            "compose chooser launched"
        );
        Ok(true)
    }

    /// Pre-fill a message directly in the app labeled exactly `name`.
    pub fn compose_in_specific_mail_app(&self, name: &str, request: &ComposeRequest) -> Result<bool> {
        let activities = self.bridge.query_activities(MailAction::SendTo)?;
        let Some(activity) = find_by_label(&activities, name) else {
            info!(label = name, "no compose-capable mail app with this label");
            return Ok(false);
        };

        let intent = compose_intent(activity, request, &self.config.compose_mime_type)
            .with_flags(FLAG_ACTIVITY_NEW_TASK);
        self.bridge.start_activity(&LaunchRequest::Direct(intent))?;

        info!(
            label = name,
            recipients = request.to.len(),
            "compose screen launched"
        );
        Ok(true)
    }

    /// Labels of every app that can open `mailto:`, in registry order.
    pub fn list_mail_apps(&self) -> Result<Vec<DiscoveredApp>> {
        let apps: Vec<_> = self
            .bridge
            .query_activities(MailAction::View)?
            .into_iter()
            .map(|activity| DiscoveredApp::new(activity.label))
            .collect();
        debug!(count = apps.len(), "mail apps listed");
        Ok(apps)
    }
}

#[cfg(test)]
mod tests {
    use openmail_bridge::intent::{
        ACTION_SENDTO, CATEGORY_LAUNCHER, ComponentName, EXTRA_BCC, EXTRA_CC, EXTRA_EMAIL,
        EXTRA_SUBJECT, EXTRA_TEXT, ExtraValue, Intent,
    };
    use openmail_bridge::memory::{InstalledApp, MemoryBridge};
    use openmail_core::error::MailBridgeError;

    use super::*;

    fn launcher(apps: Vec<InstalledApp>) -> MailAppLauncher<MemoryBridge> {
        MailAppLauncher::new(MemoryBridge::with_apps(apps))
    }

    fn two_clients() -> Vec<InstalledApp> {
        vec![
            InstalledApp::mail_client("com.google.android.gm", "Gmail").with_icon(11),
            InstalledApp::mail_client("com.microsoft.office.outlook", "Outlook").with_icon(22),
        ]
    }

    fn sample_request() -> ComposeRequest {
        ComposeRequest {
            to: vec!["a@x.com".into()],
            cc: vec![],
            bcc: vec![],
            subject: "S".into(),
            body: "B".into(),
        }
    }

    // -- OpenDefaultMailApp --

    #[test]
    fn open_default_without_apps_returns_false_and_launches_nothing() {
        let launcher = launcher(vec![]);
        assert!(!launcher.open_default_mail_app("Pick").unwrap());
        assert!(launcher.bridge().launches().unwrap().is_empty());
    }

    #[test]
    fn open_default_uses_first_app_as_default_and_labels_the_rest() {
        let launcher = launcher(two_clients());
        assert!(launcher.open_default_mail_app("Pick").unwrap());

        let launches = launcher.bridge().launches().unwrap();
        assert_eq!(launches.len(), 1);
        match &launches[0] {
            LaunchRequest::Chooser {
                title,
                target,
                alternatives,
                flags,
            } => {
                assert_eq!(title, "Pick");
                assert_eq!(*flags, FLAG_ACTIVITY_NEW_TASK);
                assert_eq!(
                    target.component.as_ref().map(|c| c.package_name.as_str()),
                    Some("com.google.android.gm")
                );
                assert_eq!(target.categories, vec![CATEGORY_LAUNCHER]);

                assert_eq!(alternatives.len(), 1);
                assert_eq!(alternatives[0].label, "Outlook");
                assert_eq!(alternatives[0].source_package, "com.microsoft.office.outlook");
                assert_eq!(alternatives[0].icon, 22);
            }
            other => panic!("expected chooser, got {other:?}"),
        }
    }

    #[test]
    fn open_default_accepts_empty_title() {
        let launcher = launcher(two_clients());
        assert!(launcher.open_default_mail_app("").unwrap());
        match &launcher.bridge().launches().unwrap()[0] {
            LaunchRequest::Chooser { title, .. } => assert_eq!(title, ""),
            other => panic!("expected chooser, got {other:?}"),
        }
    }

    #[test]
    fn open_default_applies_configured_fallback_title() {
        let config = BridgeConfig {
            fallback_chooser_title: Some("Open mail app".into()),
            ..Default::default()
        };
        let launcher = MailAppLauncher::with_config(MemoryBridge::with_apps(two_clients()), config);
        assert!(launcher.open_default_mail_app("").unwrap());
        match &launcher.bridge().launches().unwrap()[0] {
            LaunchRequest::Chooser { title, .. } => assert_eq!(title, "Open mail app"),
            other => panic!("expected chooser, got {other:?}"),
        }
    }

    #[test]
    fn open_default_skips_alternatives_without_entry_point() {
        let launcher = launcher(vec![
            InstalledApp::mail_client("com.a", "A"),
            InstalledApp::mail_client("com.headless", "Headless").without_launcher(),
            InstalledApp::mail_client("com.b", "B"),
        ]);
        assert!(launcher.open_default_mail_app("Pick").unwrap());
        match &launcher.bridge().launches().unwrap()[0] {
            LaunchRequest::Chooser { alternatives, .. } => {
                let labels: Vec<_> = alternatives.iter().map(|a| a.label.as_str()).collect();
                assert_eq!(labels, vec!["B"]);
            }
            other => panic!("expected chooser, got {other:?}"),
        }
    }

    #[test]
    fn open_default_fails_when_first_app_has_no_entry_point() {
        let launcher = launcher(vec![
            InstalledApp::mail_client("com.headless", "Headless").without_launcher(),
            InstalledApp::mail_client("com.b", "B"),
        ]);
        assert!(!launcher.open_default_mail_app("Pick").unwrap());
        assert!(launcher.bridge().launches().unwrap().is_empty());
    }

    #[test]
    fn open_default_ignores_compose_only_apps() {
        let launcher = launcher(vec![
            InstalledApp::mail_client("com.composer", "Composer").handling(&[MailAction::SendTo]),
        ]);
        assert!(!launcher.open_default_mail_app("Pick").unwrap());
    }

    // -- OpenSpecificMailApp --

    #[test]
    fn open_specific_unknown_name_returns_false() {
        let launcher = launcher(two_clients());
        assert!(!launcher.open_specific_mail_app("Thunderbird").unwrap());
        assert!(!launcher.open_specific_mail_app("gmail").unwrap());
        assert!(launcher.bridge().launches().unwrap().is_empty());
    }

    #[test]
    fn open_specific_launches_main_entry_directly() {
        let launcher = launcher(two_clients());
        assert!(launcher.open_specific_mail_app("Outlook").unwrap());

        let launches = launcher.bridge().launches().unwrap();
        assert_eq!(
            launches,
            vec![LaunchRequest::Direct(
                Intent::main_entry(ComponentName::new(
                    "com.microsoft.office.outlook",
                    "com.microsoft.office.outlook.MainActivity",
                ))
                .with_flags(FLAG_ACTIVITY_NEW_TASK)
            )]
        );
    }

    #[test]
    fn open_specific_without_entry_point_returns_false() {
        let launcher = launcher(vec![
            InstalledApp::mail_client("com.headless", "Headless").without_launcher(),
        ]);
        assert!(!launcher.open_specific_mail_app("Headless").unwrap());
        assert!(launcher.bridge().launches().unwrap().is_empty());
    }

    #[test]
    fn open_specific_first_duplicate_label_wins() {
        let launcher = launcher(vec![
            InstalledApp::mail_client("com.first", "Mail"),
            InstalledApp::mail_client("com.second", "Mail"),
        ]);
        assert!(launcher.open_specific_mail_app("Mail").unwrap());
        let launches = launcher.bridge().launches().unwrap();
        assert_eq!(
            launches[0]
                .primary_intent()
                .component
                .as_ref()
                .map(|c| c.package_name.as_str()),
            Some("com.first")
        );
    }

    // -- ComposeInDefaultMailApp --

    #[test]
    fn compose_default_without_apps_returns_false() {
        let launcher = launcher(vec![
            InstalledApp::mail_client("com.viewer", "Viewer").handling(&[MailAction::View]),
        ]);
        assert!(!launcher.compose_in_default_mail_app("Pick", &sample_request()).unwrap());
        assert!(launcher.bridge().launches().unwrap().is_empty());
    }

    #[test]
    fn compose_default_extras_match_request_exactly() {
        let launcher = launcher(two_clients());
        assert!(launcher.compose_in_default_mail_app("Send with", &sample_request()).unwrap());

        let launches = launcher.bridge().launches().unwrap();
        let LaunchRequest::Chooser {
            title,
            target,
            alternatives,
            flags,
        } = &launches[0]
        else {
            panic!("expected chooser, got {:?}", launches[0]);
        };
        assert_eq!(title, "Send with");
        assert!(alternatives.is_empty());
        assert_eq!(*flags, FLAG_ACTIVITY_NEW_TASK);
        assert_eq!(target.action.as_deref(), Some(ACTION_SENDTO));
        assert_eq!(
            target.component,
            Some(ComponentName::new(
                "com.google.android.gm",
                "com.google.android.gm.MainActivity"
            ))
        );
        assert_eq!(
            target.extras,
            vec![
                (EXTRA_EMAIL.to_string(), ExtraValue::TextArray(vec!["a@x.com".into()])),
                (EXTRA_CC.to_string(), ExtraValue::TextArray(vec![])),
                (EXTRA_BCC.to_string(), ExtraValue::TextArray(vec![])),
                (EXTRA_SUBJECT.to_string(), ExtraValue::Text("S".into())),
                (EXTRA_TEXT.to_string(), ExtraValue::Text("B".into())),
            ]
        );
    }

    #[test]
    fn compose_uses_configured_mime_type() {
        let config = BridgeConfig {
            compose_mime_type: "message/rfc822".into(),
            ..Default::default()
        };
        let launcher = MailAppLauncher::with_config(MemoryBridge::with_apps(two_clients()), config);
        assert!(launcher.compose_in_specific_mail_app("Gmail", &sample_request()).unwrap());
        let launches = launcher.bridge().launches().unwrap();
        assert_eq!(
            launches[0].primary_intent().mime_type.as_deref(),
            Some("message/rfc822")
        );
    }

    // -- ComposeInSpecificMailApp --

    #[test]
    fn compose_specific_unknown_name_returns_false() {
        let launcher = launcher(two_clients());
        assert!(!launcher.compose_in_specific_mail_app("Spark", &sample_request()).unwrap());
        assert!(launcher.bridge().launches().unwrap().is_empty());
    }

    #[test]
    fn compose_specific_launches_directly_in_matching_component() {
        let launcher = launcher(two_clients());
        assert!(launcher.compose_in_specific_mail_app("Outlook", &sample_request()).unwrap());

        let launches = launcher.bridge().launches().unwrap();
        let LaunchRequest::Direct(intent) = &launches[0] else {
            panic!("expected direct launch, got {:?}", launches[0]);
        };
        assert_eq!(
            intent.component.as_ref().map(|c| c.package_name.as_str()),
            Some("com.microsoft.office.outlook")
        );
        assert_eq!(intent.flags, FLAG_ACTIVITY_NEW_TASK);
        assert_eq!(intent.extra(EXTRA_SUBJECT), Some(&ExtraValue::Text("S".into())));
    }

    #[test]
    fn compose_specific_does_not_need_a_launcher_activity() {
        let launcher = launcher(vec![
            InstalledApp::mail_client("com.composer", "Composer").without_launcher(),
        ]);
        assert!(launcher.compose_in_specific_mail_app("Composer", &sample_request()).unwrap());
    }

    // -- ListMailApps --

    #[test]
    fn list_without_apps_is_empty() {
        assert!(launcher(vec![]).list_mail_apps().unwrap().is_empty());
    }

    #[test]
    fn list_preserves_registry_order_without_dedup() {
        let launcher = launcher(vec![
            InstalledApp::mail_client("com.z", "Zmail"),
            InstalledApp::mail_client("com.a", "Amail"),
            InstalledApp::mail_client("com.a2", "Amail"),
            InstalledApp::mail_client("com.composer", "Composer").handling(&[MailAction::SendTo]),
        ]);
        let apps = launcher.list_mail_apps().unwrap();
        assert_eq!(
            apps,
            vec![
                DiscoveredApp::new("Zmail"),
                DiscoveredApp::new("Amail"),
                DiscoveredApp::new("Amail"),
            ]
        );
        assert!(launcher.bridge().launches().unwrap().is_empty());
    }

    // -- Dispatch & platform faults --

    #[test]
    fn handle_routes_get_main_apps() {
        let launcher = launcher(two_clients());
        let reply = launcher.handle(MailCommand::GetMainApps).unwrap();
        assert_eq!(
            reply,
            CommandReply::MailApps(vec![DiscoveredApp::new("Gmail"), DiscoveredApp::new("Outlook")])
        );
    }

    #[test]
    fn handle_routes_open_specific() {
        let launcher = launcher(two_clients());
        let reply = launcher
            .handle(MailCommand::OpenSpecificMailApp {
                name: "Gmail".into(),
            })
            .unwrap();
        assert_eq!(reply, CommandReply::Launched(true));
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn stub_platform_errors_instead_of_returning_false() {
        let launcher = MailAppLauncher::new(openmail_bridge::stub::StubBridge);
        assert!(matches!(
            launcher.open_default_mail_app("Pick"),
            Err(MailBridgeError::PlatformUnavailable)
        ));
        assert!(matches!(
            launcher.list_mail_apps(),
            Err(MailBridgeError::PlatformUnavailable)
        ));
    }

    #[test]
    fn boxed_bridge_is_accepted() {
        let bridge: Box<dyn PlatformBridge> = Box::new(MemoryBridge::with_apps(two_clients()));
        let launcher = MailAppLauncher::new(bridge);
        assert_eq!(launcher.list_mail_apps().unwrap().len(), 2);
    }
}
