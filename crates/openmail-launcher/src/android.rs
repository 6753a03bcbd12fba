// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JNI entry points for the Android host plugin.
//
// The Kotlin side declares, in `com.openmail.bridge.OpenMailBridge`:
//
//   external fun nativeInit(context: Context, configJson: String?): Boolean
//   external fun nativeHandleMethodCall(envelope: String): String
//
// `nativeInit` must run once (from `onAttachedToEngine`) before any call is
// forwarded; it pins the application context and registers it with
// `ndk_context` so the bridge can reach `PackageManager`.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::JNIEnv;
use jni::objects::{GlobalRef, JClass, JObject, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jstring};

use openmail_core::config::BridgeConfig;
use openmail_core::error::{MailBridgeError, Result};

use crate::channel::{MethodResponse, dispatch_json};
use crate::launcher::MailAppLauncher;
use crate::logging::init_tracing;

static APP_CONTEXT: OnceLock<GlobalRef> = OnceLock::new();
static LAUNCHER: OnceLock<MailAppLauncher> = OnceLock::new();

fn jni_err(context: &str, e: jni::errors::Error) -> MailBridgeError {
    MailBridgeError::Bridge(format!("{context}: {e}"))
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_openmail_bridge_OpenMailBridge_nativeInit<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
    config_json: JString<'local>,
) -> jboolean {
    match init(&mut env, &context, &config_json) {
        Ok(()) => JNI_TRUE,
        Err(e) => {
            tracing::error!(error = %e, "OpenMail bridge initialisation failed");
            JNI_FALSE
        }
    }
}

fn init(env: &mut JNIEnv<'_>, context: &JObject<'_>, config_json: &JString<'_>) -> Result<()> {
    let config = if config_json.is_null() {
        BridgeConfig::default()
    } else {
        let json: String = env
            .get_string(config_json)
            .map_err(|e| jni_err("get_string(configJson)", e))?
            .into();
        BridgeConfig::from_json(&json)?
    };
    init_tracing(&config);

    if APP_CONTEXT.get().is_none() {
        let global = env
            .new_global_ref(context)
            .map_err(|e| jni_err("new_global_ref(context)", e))?;
        let vm = env
            .get_java_vm()
            .map_err(|e| jni_err("get_java_vm", e))?;

        let mut first = false;
        let pinned = APP_CONTEXT.get_or_init(|| {
            first = true;
            global
        });
        if first {
            // SAFETY: both pointers stay valid for the life of the process:
            // the VM never unloads and `pinned` is a global reference held
            // in a static.
            unsafe {
                ndk_context::initialize_android_context(
                    vm.get_java_vm_pointer().cast(),
                    pinned.as_obj().as_raw().cast(),
                );
            }
        }
    }

    LAUNCHER.get_or_init(|| MailAppLauncher::for_platform(config));
    tracing::info!("OpenMail bridge initialised");
    Ok(())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_openmail_bridge_OpenMailBridge_nativeHandleMethodCall<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    envelope: JString<'local>,
) -> jstring {
    let reply = match (LAUNCHER.get(), env.get_string(&envelope)) {
        (Some(launcher), Ok(envelope)) => dispatch_json(launcher, &String::from(envelope)),
        (None, _) => MethodResponse::from_error(&MailBridgeError::Bridge(
            "nativeInit has not been called".into(),
        ))
        .to_json(),
        (_, Err(e)) => {
            MethodResponse::from_error(&MailBridgeError::InvalidEnvelope(e.to_string())).to_json()
        }
    };

    match env.new_string(reply) {
        Ok(j_reply) => j_reply.into_raw(),
        Err(e) => {
            tracing::error!(error = %e, "failed to return method call reply");
            JObject::null().into_raw()
        }
    }
}
