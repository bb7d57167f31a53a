//! Single reporting path for every failure: timestamped log line plus a
//! dismissible banner. Also hosts the page-wide `error` /
//! `unhandledrejection` listeners.

use chrono::Utc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, PromiseRejectionEvent};

use crate::components::error_banner;
use crate::debug_log;
use crate::dom_utils;
use crate::error::{describe_js_error, AppError};
use crate::i18n::{error_message, Locale};
use crate::messages::Message;
use crate::state::dispatch_global_message;

/// Uncaught errors raised when something touches the Sheets client before
/// `gapi.client.init` finished. Refresh retries once the client is ready.
const BENIGN_PATTERNS: &[&str] = &[
    "gapi.client.sheets is not available",
    "reading 'sheets'",
    "reading 'spreadsheets'",
    "gapi.client.sheets is undefined",
];

pub fn is_benign(message: &str) -> bool {
    BENIGN_PATTERNS.iter().any(|p| message.contains(p))
}

pub fn report_error(err: &AppError, locale: Locale) {
    log::error!("[{}] {} error: {}", Utc::now().to_rfc3339(), err.kind(), err);

    let shown = dom_utils::document()
        .and_then(|doc| error_banner::show_error(&doc, &error_message(locale, err), locale));
    if let Err(e) = shown {
        log::warn!("error banner unavailable: {}", e);
    }
}

fn forward(message: String) {
    if is_benign(&message) {
        debug_log!("suppressed benign error: {}", message);
        return;
    }
    dispatch_global_message(Message::ErrorRaised(AppError::Remote(message)));
}

/// Route uncaught errors and unhandled promise rejections to [`report_error`].
pub fn install_global_handlers() -> Result<(), AppError> {
    let window = web_sys::window().ok_or_else(|| AppError::Dom("window".into()))?;

    let on_error = Closure::wrap(Box::new(|event: ErrorEvent| {
        forward(event.message());
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
    on_error.forget();

    let on_rejection = Closure::wrap(Box::new(|event: PromiseRejectionEvent| {
        forward(describe_js_error(&event.reason()));
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback(
        "unhandledrejection",
        on_rejection.as_ref().unchecked_ref(),
    )?;
    on_rejection.forget();

    Ok(())
}
