use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

#[macro_use]
mod macros;

pub mod command_executors;
pub mod components;
pub mod config;
pub mod constants;
pub mod dom_utils;
pub mod error;
pub mod i18n;
pub mod init;
pub mod messages;
pub mod models;
pub mod mutations;
pub mod readiness;
pub mod report;
pub mod retry;
pub mod session;
pub mod sheets;
pub mod state;
pub mod storage;
pub mod toast;
pub mod update;

use crate::config::{runtime_config_from_window, AppConfig, RuntimeConfig};
use crate::constants::ID_SIGNOUT_BUTTON;
use crate::error::AppError;
use crate::i18n::Locale;
use crate::messages::Message;
use crate::state::{dispatch_global_message, APP_STATE};
use crate::storage::{BrowserSessionStore, SessionStore};

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // Already initialised when the module is instantiated twice (tests).
    let _ = console_log::init_with_level(level);

    if let Err(e) = report::install_global_handlers() {
        log::warn!("global error handlers not installed: {}", e);
    }

    let document = dom_utils::document()?;
    APP_STATE.with(|s| s.borrow_mut().locale = Locale::detect());

    dispatch_global_message(Message::Boot {
        config: Ok(load_config()),
        persisted_signed_in: BrowserSessionStore.load(),
        containers: dom_utils::view_containers(&document),
    });

    components::forms::wire(&document);
    wire_sign_out(&document);

    // The SDK scripts are loaded async and may have finished before us.
    detect_sdk_scripts();
    Ok(())
}

fn load_config() -> AppConfig {
    let mut cfg = AppConfig::from_env();
    if let Some(rt) = runtime_config_from_window() {
        cfg.merge_runtime(rt);
    }
    cfg
}

fn detect_sdk_scripts() {
    let gapi_present = web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &"gapi".into()).ok())
        .map_or(false, |g| !g.is_undefined() && !g.is_null());
    if gapi_present {
        dispatch_global_message(Message::ApiScriptLoaded);
    }
    if components::auth::identity_script_present() {
        dispatch_global_message(Message::IdentityScriptLoaded);
    }
}

fn wire_sign_out(document: &Document) {
    let Some(button) = document.get_element_by_id(ID_SIGNOUT_BUTTON) else {
        return;
    };
    // Pages that call handle_sign_out() from markup keep that wiring.
    if button.has_attribute("onclick") {
        return;
    }
    let on_click =
        Closure::wrap(Box::new(|_: web_sys::Event| handle_sign_out()) as Box<dyn FnMut(_)>);
    if let Err(e) =
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
    {
        log::warn!("sign-out button not wired: {}", AppError::from(e));
    }
    on_click.forget();
}

/// `onload` of the gapi `<script>`.
#[wasm_bindgen]
pub fn gapi_loaded() {
    dispatch_global_message(Message::ApiScriptLoaded);
}

/// `onload` of the Google Identity Services `<script>`.
#[wasm_bindgen]
pub fn gis_loaded() {
    dispatch_global_message(Message::IdentityScriptLoaded);
}

/// Credential callback for pages that register their own GIS handler.
#[wasm_bindgen]
pub fn handle_credential_response(response: JsValue) {
    components::auth::credential_received(&response);
}

#[wasm_bindgen]
pub fn handle_sign_out() {
    match dom_utils::document() {
        Ok(doc) => dispatch_global_message(Message::SignOutRequested {
            containers: dom_utils::view_containers(&doc),
        }),
        Err(e) => log::warn!("sign-out ignored: {}", e),
    }
}

/// Runtime config from `config.js`, overriding build-time values.
#[wasm_bindgen]
pub fn init_app_config_js(config: JsValue) -> Result<(), JsValue> {
    let rt: RuntimeConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| AppError::Config(format!("invalid config object: {}", e)))?;
    let mut cfg = state::with_state(|s| s.config.clone());
    cfg.merge_runtime(rt);
    dispatch_global_message(Message::ConfigProvided(Ok(cfg)));
    detect_sdk_scripts();
    Ok(())
}

#[wasm_bindgen]
pub fn refresh_customers() {
    dispatch_global_message(Message::RefreshRequested);
}
