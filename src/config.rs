//! Application configuration.
//!
//! Values come from two layers: compile-time env vars (`CRM_API_KEY`, ...)
//! read with `option_env!`, then a runtime object supplied by the page either
//! through `window.CRM_CONFIG` or by calling `init_app_config_js()` from
//! `config.js`. Runtime values win when non-empty.

use serde::Deserialize;

use crate::constants::{DEFAULT_SHEET_NAME, DISCOVERY_DOC, SHEETS_SCOPES};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub client_id: String,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    /// Numeric sheet (tab) id, needed by `deleteDimension`.
    pub sheet_id: i64,
    /// Space separated OAuth scopes.
    pub scopes: String,
}

impl Default for AppConfig {
    /// Empty credentials with the default tab. Only useful before
    /// `from_env()`/`merge_runtime()` ran, or in unit tests.
    fn default() -> Self {
        Self {
            api_key: String::new(),
            client_id: String::new(),
            spreadsheet_id: String::new(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            sheet_id: 0,
            scopes: SHEETS_SCOPES.to_string(),
        }
    }
}

/// Shape of the runtime config object. Every key is optional so the page can
/// override just what differs from the build.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default)]
    pub sheet_name: Option<String>,
    #[serde(default)]
    pub sheet_id: Option<i64>,
    #[serde(default)]
    pub scopes: Option<String>,
}

impl AppConfig {
    /// Build from compile-time environment. Missing vars stay empty and are
    /// reported by [`AppConfig::validate`].
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.api_key = option_env!("CRM_API_KEY").unwrap_or("").to_string();
        cfg.client_id = option_env!("CRM_CLIENT_ID").unwrap_or("").to_string();
        cfg.spreadsheet_id = option_env!("CRM_SPREADSHEET_ID").unwrap_or("").to_string();
        if let Some(name) = option_env!("CRM_SHEET_NAME").filter(|s| !s.is_empty()) {
            cfg.sheet_name = name.to_string();
        }
        if let Some(id) = option_env!("CRM_SHEET_ID").and_then(|s| s.trim().parse().ok()) {
            cfg.sheet_id = id;
        }
        cfg
    }

    /// Overlay runtime values on top of the current ones.
    pub fn merge_runtime(&mut self, rt: RuntimeConfig) {
        fn take(dst: &mut String, src: Option<String>) {
            if let Some(v) = src.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
                *dst = v;
            }
        }
        take(&mut self.api_key, rt.api_key);
        take(&mut self.client_id, rt.client_id);
        take(&mut self.spreadsheet_id, rt.spreadsheet_id);
        take(&mut self.sheet_name, rt.sheet_name);
        take(&mut self.scopes, rt.scopes);
        if let Some(id) = rt.sheet_id {
            self.sheet_id = id;
        }
    }

    /// Fail on the first missing required key.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("apiKey", &self.api_key),
            ("clientId", &self.client_id),
            ("spreadsheetId", &self.spreadsheet_id),
            ("sheetName", &self.sheet_name),
            ("scopes", &self.scopes),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{} is not set", key)));
            }
        }
        Ok(())
    }

    pub fn discovery_docs(&self) -> [&'static str; 1] {
        [DISCOVERY_DOC]
    }
}

/// Read `window.CRM_CONFIG` if the page defined one.
pub fn runtime_config_from_window() -> Option<RuntimeConfig> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &"CRM_CONFIG".into()).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match serde_wasm_bindgen::from_value::<RuntimeConfig>(value) {
        Ok(rt) => Some(rt),
        Err(e) => {
            log::warn!("window.CRM_CONFIG ignored: {}", e);
            None
        }
    }
}
