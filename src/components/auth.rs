//! Google Identity Services glue.
//!
//! `google.accounts.id` is reached via `js_sys::Reflect` because the GIS
//! script loads asynchronously and may be absent.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::constants::ID_SIGN_IN_CONTAINER;
use crate::dom_utils;
use crate::error::AppError;
use crate::messages::Message;
use crate::state::dispatch_global_message;

fn identity_namespace() -> Result<JsValue, AppError> {
    let window = web_sys::window().ok_or_else(|| AppError::Dom("window".into()))?;
    let mut current: JsValue = window.into();
    for key in ["google", "accounts", "id"] {
        current = Reflect::get(&current, &key.into()).map_err(AppError::from)?;
        if current.is_undefined() || current.is_null() {
            return Err(AppError::Remote("google.accounts.id is not available".into()));
        }
    }
    Ok(current)
}

fn identity_fn(id: &JsValue, name: &str) -> Result<Function, AppError> {
    Reflect::get(id, &name.into())
        .map_err(AppError::from)?
        .dyn_into::<Function>()
        .map_err(|_| AppError::Remote(format!("google.accounts.id.{} is not a function", name)))
}

/// Whether the GIS script already ran (page may load it before the wasm).
pub fn identity_script_present() -> bool {
    identity_namespace().is_ok()
}

/// `google.accounts.id.initialize({ client_id, callback })`.
pub fn init_identity(client_id: &str) -> Result<(), AppError> {
    let id = identity_namespace()?;
    let initialize = identity_fn(&id, "initialize")?;

    let callback = Closure::wrap(Box::new(|resp: JsValue| {
        credential_received(&resp);
    }) as Box<dyn FnMut(JsValue)>);

    let opts = Object::new();
    Reflect::set(&opts, &"client_id".into(), &JsValue::from_str(client_id))
        .map_err(AppError::from)?;
    Reflect::set(&opts, &"callback".into(), callback.as_ref()).map_err(AppError::from)?;

    initialize.call1(&id, &opts).map_err(AppError::from)?;

    // GIS keeps the callback for the lifetime of the page.
    callback.forget();
    Ok(())
}

/// `google.accounts.id.renderButton(#sign-in-container, {...})`.
pub fn render_sign_in_button(document: &Document) -> Result<(), AppError> {
    let container = dom_utils::by_id(document, ID_SIGN_IN_CONTAINER)?;
    let id = identity_namespace()?;
    let render = identity_fn(&id, "renderButton")?;

    let opts = Object::new();
    let _ = Reflect::set(&opts, &"theme".into(), &"outline".into());
    let _ = Reflect::set(&opts, &"size".into(), &"large".into());

    render
        .call2(&id, &container.into(), &opts)
        .map_err(AppError::from)?;
    Ok(())
}

/// `google.accounts.id.disableAutoSelect()`, so the next visit does not sign
/// straight back in.
pub fn disable_auto_select() -> Result<(), AppError> {
    let id = identity_namespace()?;
    identity_fn(&id, "disableAutoSelect")?
        .call0(&id)
        .map_err(AppError::from)?;
    Ok(())
}

/// Turn a GIS credential response into a session message.
pub fn credential_received(response: &JsValue) {
    let credential = Reflect::get(response, &"credential".into())
        .ok()
        .and_then(|c| c.as_string());
    let containers = match dom_utils::document() {
        Ok(doc) => dom_utils::view_containers(&doc),
        Err(e) => {
            log::warn!("credential ignored: {}", e);
            return;
        }
    };
    dispatch_global_message(Message::CredentialReceived {
        credential,
        containers,
    });
}
