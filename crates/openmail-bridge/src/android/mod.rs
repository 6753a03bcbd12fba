// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Registry queries go through the application
// context's `PackageManager`; launches rebuild the Rust-side `Intent` model
// as `android.content.Intent` objects and hand them to
// `Context.startActivity`.
//
// ## Architecture notes
//
// The host plugin only holds the *application* context, never an Activity,
// so every launch carries `FLAG_ACTIVITY_NEW_TASK`. The JavaVM and context
// pointers come from `ndk_context`, which the launcher's JNI entry point
// initialises on first use.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::objects::{JObject, JString, JValue};
use jni::sys::jsize;
use jni::{JNIEnv, JavaVM};

use openmail_core::error::{MailBridgeError, Result};

use crate::intent::{
    ComponentName, EXTRA_INITIAL_INTENTS, ExtraValue, Intent, LabeledIntent, LaunchRequest,
    MailAction,
};
use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// The process-wide `JavaVM`, read from `ndk_context` on first use.
fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` registered with ndk-context.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| MailBridgeError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    Ok(JAVA_VM.get_or_init(|| vm))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| MailBridgeError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the application `Context` registered with `ndk_context`.
fn context() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(MailBridgeError::Bridge(
            "Android context is null — bridge not initialised".into(),
        ));
    }
    // SAFETY: ndk-context holds a global reference to the context for the
    // lifetime of the process.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `MailBridgeError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> MailBridgeError {
    MailBridgeError::Bridge(format!("{context}: {e}"))
}

/// Run `f` with a JNI env and the application context, clearing any Java
/// exception `f` left pending so the next call starts clean.
fn with_context<T>(
    f: impl FnOnce(&mut JNIEnv<'static>, &JObject<'static>) -> Result<T>,
) -> Result<T> {
    let mut env = jni_env()?;
    let ctx = context()?;
    let result = f(&mut env, &ctx);
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    result
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the OpenMail platform bridge.
///
/// The struct is zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI; the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// AppRegistry — PackageManager
// ---------------------------------------------------------------------------

impl AppRegistry for AndroidBridge {
    /// `packageManager.queryIntentActivities(Intent(action, "mailto:"), 0)`,
    /// flattened into [`ResolvedActivity`] values in the returned order.
    fn query_activities(&self, action: MailAction) -> Result<Vec<ResolvedActivity>> {
        with_context(|env, ctx| {
            let pm = package_manager(env, ctx)?;
            let query = new_java_intent(env, &action.query_intent())?;

            let list: JObject = env
                .call_method(
                    &pm,
                    "queryIntentActivities",
                    "(Landroid/content/Intent;I)Ljava/util/List;",
                    &[JValue::Object(&query), JValue::Int(0)],
                )
                .map_err(|e| jni_err("queryIntentActivities", e))?
                .l()
                .map_err(|e| jni_err("queryIntentActivities->l", e))?;

            let size = env
                .call_method(&list, "size", "()I", &[])
                .map_err(|e| jni_err("List.size", e))?
                .i()
                .map_err(|e| jni_err("List.size->i", e))?;

            let mut activities = Vec::with_capacity(size.max(0) as usize);
            for i in 0..size {
                let info: JObject = env
                    .call_method(&list, "get", "(I)Ljava/lang/Object;", &[JValue::Int(i)])
                    .map_err(|e| jni_err("List.get", e))?
                    .l()
                    .map_err(|e| jni_err("List.get->l", e))?;

                activities.push(resolve_info(env, &pm, &info)?);

                env.delete_local_ref(info)
                    .map_err(|e| jni_err("delete_local_ref(ResolveInfo)", e))?;
            }

            tracing::debug!(%action, count = activities.len(), "Android: registry query");
            Ok(activities)
        })
    }

    /// `packageManager.getLaunchIntentForPackage(packageName)`, reduced to
    /// the component it targets.
    fn launch_intent_for_package(&self, package_name: &str) -> Result<Option<Intent>> {
        with_context(|env, ctx| {
            let pm = package_manager(env, ctx)?;
            let j_pkg: JString = env
                .new_string(package_name)
                .map_err(|e| jni_err("new_string(packageName)", e))?;

            let launch: JObject = env
                .call_method(
                    &pm,
                    "getLaunchIntentForPackage",
                    "(Ljava/lang/String;)Landroid/content/Intent;",
                    &[JValue::Object(&j_pkg)],
                )
                .map_err(|e| jni_err("getLaunchIntentForPackage", e))?
                .l()
                .map_err(|e| jni_err("getLaunchIntentForPackage->l", e))?;

            if launch.is_null() {
                tracing::debug!(package = package_name, "Android: package has no launch intent");
                return Ok(None);
            }

            let component: JObject = env
                .call_method(&launch, "getComponent", "()Landroid/content/ComponentName;", &[])
                .map_err(|e| jni_err("Intent.getComponent", e))?
                .l()
                .map_err(|e| jni_err("getComponent->l", e))?;

            if component.is_null() {
                tracing::warn!(package = package_name, "Android: launch intent has no component");
                return Ok(None);
            }

            let pkg = string_method(env, &component, "getPackageName")?;
            let class = string_method(env, &component, "getClassName")?;
            Ok(Some(Intent::main_entry(ComponentName::new(pkg, class))))
        })
    }
}

// ---------------------------------------------------------------------------
// ActivityLauncher — Context.startActivity
// ---------------------------------------------------------------------------

impl ActivityLauncher for AndroidBridge {
    /// Build the Java intent (wrapping it in `Intent.createChooser` for
    /// chooser requests) and start it from the application context.
    ///
    /// Returns `Ok(())` once `startActivity` returns. The user may still
    /// dismiss the chooser or the compose screen; that is not an error.
    fn start_activity(&self, request: &LaunchRequest) -> Result<()> {
        with_context(|env, ctx| {
            let intent = match request {
                LaunchRequest::Direct(intent) => new_java_intent(env, intent)?,
                LaunchRequest::Chooser {
                    title,
                    target,
                    alternatives,
                    flags,
                } => new_java_chooser(env, title, target, alternatives, *flags)?,
            };

            env.call_method(
                ctx,
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&intent)],
            )
            .map_err(|e| jni_err("startActivity", e))?;

            tracing::info!(
                component = ?request.primary_intent().component,
                "Android: activity launch dispatched"
            );
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// `context.getPackageManager()`.
fn package_manager<'a>(env: &mut JNIEnv<'a>, ctx: &JObject<'_>) -> Result<JObject<'a>> {
    env.call_method(
        ctx,
        "getPackageManager",
        "()Landroid/content/pm/PackageManager;",
        &[],
    )
    .map_err(|e| jni_err("getPackageManager", e))?
    .l()
    .map_err(|e| jni_err("getPackageManager->l", e))
}

/// Read one `ResolveInfo` into a [`ResolvedActivity`].
fn resolve_info(
    env: &mut JNIEnv<'_>,
    pm: &JObject<'_>,
    info: &JObject<'_>,
) -> Result<ResolvedActivity> {
    let activity_info: JObject = env
        .get_field(info, "activityInfo", "Landroid/content/pm/ActivityInfo;")
        .map_err(|e| jni_err("ResolveInfo.activityInfo", e))?
        .l()
        .map_err(|e| jni_err("activityInfo->l", e))?;

    let package_name = string_field(env, &activity_info, "packageName")?;
    let activity_name = string_field(env, &activity_info, "name")?;

    let icon = env
        .get_field(info, "icon", "I")
        .map_err(|e| jni_err("ResolveInfo.icon", e))?
        .i()
        .map_err(|e| jni_err("icon->i", e))?;

    // loadLabel returns a CharSequence; the label is OS-localized.
    let label_seq: JObject = env
        .call_method(
            info,
            "loadLabel",
            "(Landroid/content/pm/PackageManager;)Ljava/lang/CharSequence;",
            &[JValue::Object(pm)],
        )
        .map_err(|e| jni_err("ResolveInfo.loadLabel", e))?
        .l()
        .map_err(|e| jni_err("loadLabel->l", e))?;
    let label = string_method(env, &label_seq, "toString")?;

    Ok(ResolvedActivity {
        package_name,
        activity_name,
        label,
        icon,
    })
}

/// Read a `String` field, treating `null` as empty.
fn string_field(env: &mut JNIEnv<'_>, obj: &JObject<'_>, name: &str) -> Result<String> {
    let value: JObject = env
        .get_field(obj, name, "Ljava/lang/String;")
        .map_err(|e| jni_err(name, e))?
        .l()
        .map_err(|e| jni_err(name, e))?;
    java_string(env, value)
}

/// Call a no-arg method returning `String`, treating `null` as empty.
fn string_method(env: &mut JNIEnv<'_>, obj: &JObject<'_>, method: &str) -> Result<String> {
    let value: JObject = env
        .call_method(obj, method, "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err(method, e))?
        .l()
        .map_err(|e| jni_err(method, e))?;
    java_string(env, value)
}

fn java_string(env: &mut JNIEnv<'_>, value: JObject<'_>) -> Result<String> {
    if value.is_null() {
        return Ok(String::new());
    }
    let j_str = JString::from(value);
    let text: String = env
        .get_string(&j_str)
        .map_err(|e| jni_err("get_string", e))?
        .into();
    Ok(text)
}

/// Build an `android.content.Intent` from the Rust-side model.
fn new_java_intent<'a>(env: &mut JNIEnv<'a>, intent: &Intent) -> Result<JObject<'a>> {
    let j_intent: JObject = env
        .new_object("android/content/Intent", "()V", &[])
        .map_err(|e| jni_err("new Intent", e))?;

    if let Some(action) = &intent.action {
        let j_action: JString = env
            .new_string(action)
            .map_err(|e| jni_err("new_string(action)", e))?;
        env.call_method(
            &j_intent,
            "setAction",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_action)],
        )
        .map_err(|e| jni_err("setAction", e))?;
    }

    // setType clears data and vice versa, so both go through setDataAndType.
    match (&intent.data, &intent.mime_type) {
        (Some(data), Some(mime)) => {
            let uri = parse_uri(env, data)?;
            let j_mime: JString = env
                .new_string(mime)
                .map_err(|e| jni_err("new_string(mime_type)", e))?;
            env.call_method(
                &j_intent,
                "setDataAndType",
                "(Landroid/net/Uri;Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&uri), JValue::Object(&j_mime)],
            )
            .map_err(|e| jni_err("setDataAndType", e))?;
        }
        (Some(data), None) => {
            let uri = parse_uri(env, data)?;
            env.call_method(
                &j_intent,
                "setData",
                "(Landroid/net/Uri;)Landroid/content/Intent;",
                &[JValue::Object(&uri)],
            )
            .map_err(|e| jni_err("setData", e))?;
        }
        (None, Some(mime)) => {
            let j_mime: JString = env
                .new_string(mime)
                .map_err(|e| jni_err("new_string(mime_type)", e))?;
            env.call_method(
                &j_intent,
                "setType",
                "(Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&j_mime)],
            )
            .map_err(|e| jni_err("setType", e))?;
        }
        (None, None) => {}
    }

    if let Some(component) = &intent.component {
        let j_pkg: JString = env
            .new_string(&component.package_name)
            .map_err(|e| jni_err("new_string(package)", e))?;
        let j_class: JString = env
            .new_string(&component.class_name)
            .map_err(|e| jni_err("new_string(class)", e))?;
        env.call_method(
            &j_intent,
            "setClassName",
            "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_pkg), JValue::Object(&j_class)],
        )
        .map_err(|e| jni_err("setClassName", e))?;
    }

    for category in &intent.categories {
        let j_category: JString = env
            .new_string(category)
            .map_err(|e| jni_err("new_string(category)", e))?;
        env.call_method(
            &j_intent,
            "addCategory",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_category)],
        )
        .map_err(|e| jni_err("addCategory", e))?;
    }

    for (key, value) in &intent.extras {
        put_extra(env, &j_intent, key, value)?;
    }

    if intent.flags != 0 {
        env.call_method(
            &j_intent,
            "setFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(intent.flags)],
        )
        .map_err(|e| jni_err("setFlags", e))?;
    }

    Ok(j_intent)
}

/// `Intent.createChooser(target, title)` with `EXTRA_INITIAL_INTENTS` set to
/// one `LabeledIntent` per alternative.
fn new_java_chooser<'a>(
    env: &mut JNIEnv<'a>,
    title: &str,
    target: &Intent,
    alternatives: &[LabeledIntent],
    flags: i32,
) -> Result<JObject<'a>> {
    let j_target = new_java_intent(env, target)?;
    let j_title: JString = env
        .new_string(title)
        .map_err(|e| jni_err("new_string(chooser_title)", e))?;

    let chooser: JObject = env
        .call_static_method(
            "android/content/Intent",
            "createChooser",
            "(Landroid/content/Intent;Ljava/lang/CharSequence;)Landroid/content/Intent;",
            &[JValue::Object(&j_target), JValue::Object(&j_title)],
        )
        .map_err(|e| jni_err("Intent.createChooser", e))?
        .l()
        .map_err(|e| jni_err("createChooser->l", e))?;

    if !alternatives.is_empty() {
        let labeled_class = env
            .find_class("android/content/pm/LabeledIntent")
            .map_err(|e| jni_err("find_class(LabeledIntent)", e))?;

        let array = env
            .new_object_array(alternatives.len() as jsize, &labeled_class, &JObject::null())
            .map_err(|e| jni_err("new_object_array(LabeledIntent)", e))?;

        for (i, alternative) in alternatives.iter().enumerate() {
            let j_alt = new_java_intent(env, &alternative.intent)?;
            let j_source: JString = env
                .new_string(&alternative.source_package)
                .map_err(|e| jni_err("new_string(source_package)", e))?;
            let j_label: JString = env
                .new_string(&alternative.label)
                .map_err(|e| jni_err("new_string(label)", e))?;

            let labeled: JObject = env
                .new_object(
                    &labeled_class,
                    "(Landroid/content/Intent;Ljava/lang/String;Ljava/lang/CharSequence;I)V",
                    &[
                        JValue::Object(&j_alt),
                        JValue::Object(&j_source),
                        JValue::Object(&j_label),
                        JValue::Int(alternative.icon),
                    ],
                )
                .map_err(|e| jni_err("new LabeledIntent", e))?;

            env.set_object_array_element(&array, i as jsize, labeled)
                .map_err(|e| jni_err("set_object_array_element", e))?;
        }

        let j_key: JString = env
            .new_string(EXTRA_INITIAL_INTENTS)
            .map_err(|e| jni_err("new_string(EXTRA_INITIAL_INTENTS)", e))?;
        env.call_method(
            &chooser,
            "putExtra",
            "(Ljava/lang/String;[Landroid/os/Parcelable;)Landroid/content/Intent;",
            &[JValue::Object(&j_key), JValue::Object(&array)],
        )
        .map_err(|e| jni_err("putExtra(EXTRA_INITIAL_INTENTS)", e))?;
    }

    if flags != 0 {
        env.call_method(
            &chooser,
            "setFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(flags)],
        )
        .map_err(|e| jni_err("setFlags(chooser)", e))?;
    }

    Ok(chooser)
}

/// `intent.putExtra(key, String)` or `intent.putExtra(key, String[])`.
fn put_extra(
    env: &mut JNIEnv<'_>,
    j_intent: &JObject<'_>,
    key: &str,
    value: &ExtraValue,
) -> Result<()> {
    let j_key: JString = env
        .new_string(key)
        .map_err(|e| jni_err("new_string(extra key)", e))?;

    match value {
        ExtraValue::Text(text) => {
            let j_text: JString = env
                .new_string(text)
                .map_err(|e| jni_err("new_string(extra)", e))?;
            env.call_method(
                j_intent,
                "putExtra",
                "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&j_key), JValue::Object(&j_text)],
            )
            .map_err(|e| jni_err("putExtra(String)", e))?;
        }
        ExtraValue::TextArray(items) => {
            let string_class = env
                .find_class("java/lang/String")
                .map_err(|e| jni_err("find_class(String)", e))?;

            let array = env
                .new_object_array(items.len() as jsize, &string_class, &JObject::null())
                .map_err(|e| jni_err("new_object_array(String)", e))?;

            for (i, item) in items.iter().enumerate() {
                let j_item: JString = env
                    .new_string(item)
                    .map_err(|e| jni_err("new_string(extra[i])", e))?;
                env.set_object_array_element(&array, i as jsize, j_item)
                    .map_err(|e| jni_err("set_object_array_element", e))?;
            }

            env.call_method(
                j_intent,
                "putExtra",
                "(Ljava/lang/String;[Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&j_key), JValue::Object(&array)],
            )
            .map_err(|e| jni_err("putExtra(String[])", e))?;
        }
    }
    Ok(())
}

/// `Uri.parse(uri)`.
fn parse_uri<'a>(env: &mut JNIEnv<'a>, uri: &str) -> Result<JObject<'a>> {
    let j_uri: JString = env
        .new_string(uri)
        .map_err(|e| jni_err("new_string(uri)", e))?;
    env.call_static_method(
        "android/net/Uri",
        "parse",
        "(Ljava/lang/String;)Landroid/net/Uri;",
        &[JValue::Object(&j_uri)],
    )
    .map_err(|e| jni_err("Uri.parse", e))?
    .l()
    .map_err(|e| jni_err("Uri.parse->l", e))
}
