//! Error taxonomy shared by every handler.
//!
//! Handlers return `Result<_, AppError>` and hand failures to
//! [`crate::report::report_error`]; nothing in the crate escalates to a panic.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Missing API key, client id, spreadsheet id, ...
    #[error("configuration error: {0}")]
    Config(String),

    /// Identity provider did not hand us a usable credential.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Network failure or API rejection from the spreadsheet client.
    #[error("remote call failed: {0}")]
    Remote(String),

    /// An element the page is expected to provide is absent.
    #[error("missing DOM element: #{0}")]
    Dom(String),

    /// User input rejected before any remote call.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Auth(_) => "auth",
            AppError::Remote(_) => "remote",
            AppError::Dom(_) => "dom",
            AppError::Validation(_) => "validation",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Config(s)
            | AppError::Auth(s)
            | AppError::Remote(s)
            | AppError::Dom(s)
            | AppError::Validation(s) => s,
        }
    }
}

/// Binding errors surface as opaque `JsValue`s; they always come from a
/// remote/SDK call so they map to `Remote`.
impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Remote(describe_js_error(&value))
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value. gapi rejects with
/// `{ result: { error: { message } } }`, plain `Error`s carry `message`.
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    let get = |target: &JsValue, key: &str| {
        js_sys::Reflect::get(target, &JsValue::from_str(key)).ok()
    };

    let gapi_message = get(value, "result")
        .and_then(|r| get(&r, "error"))
        .and_then(|e| get(&e, "message"))
        .and_then(|m| m.as_string());
    if let Some(msg) = gapi_message {
        return msg;
    }
    if let Some(msg) = get(value, "message").and_then(|m| m.as_string()) {
        return msg;
    }
    format!("{:?}", value)
}
