//! Bindings to the `gapi` JS client (loaded by `<script src="https://apis.google.com/js/api.js">`).
//!
//! Reached through `js_sys::Reflect` rather than `extern` blocks: the script
//! loads asynchronously and its namespaces (`gapi.client.sheets`) only exist
//! after discovery, so every lookup has to be checked at call time.

use js_sys::{Function, Object, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{BatchUpdateRequest, SheetsApi, ValueRange};
use crate::config::AppConfig;
use crate::constants::VALUE_INPUT_OPTION;
use crate::debug_log;
use crate::error::AppError;

fn lookup(target: &JsValue, path: &[&str]) -> Result<JsValue, AppError> {
    let mut current = target.clone();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key)).map_err(AppError::from)?;
        if current.is_undefined() || current.is_null() {
            return Err(AppError::Remote(format!("{} is not available", path.join("."))));
        }
    }
    Ok(current)
}

fn gapi() -> Result<JsValue, AppError> {
    let window = web_sys::window().ok_or_else(|| AppError::Dom("window".into()))?;
    lookup(&window, &["gapi"])
}

fn method(target: &JsValue, name: &str) -> Result<Function, AppError> {
    lookup(target, &[name])?
        .dyn_into::<Function>()
        .map_err(|_| AppError::Remote(format!("{} is not a function", name)))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, AppError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| AppError::Remote(format!("failed to encode request: {}", e)))
}

fn set(obj: &Object, key: &str, value: &JsValue) -> Result<(), AppError> {
    Reflect::set(obj, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(AppError::from)
}

/// gapi requests are thenables, not real Promises.
async fn await_thenable(value: JsValue) -> Result<JsValue, AppError> {
    JsFuture::from(Promise::resolve(&value))
        .await
        .map_err(AppError::from)
}

/// `gapi.load('client', ...)` as a future.
pub async fn load_client() -> Result<(), AppError> {
    let gapi = gapi()?;
    let load = method(&gapi, "load")?;

    let mut setup_error = None;
    let promise = Promise::new(&mut |resolve, reject| {
        let opts = Object::new();
        let on_load = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let wired = set(&opts, "callback", &on_load)
            .and_then(|_| set(&opts, "onerror", &reject))
            .and_then(|_| {
                load.call2(&gapi, &JsValue::from_str("client"), &opts)
                    .map_err(AppError::from)
            });
        if let Err(e) = wired {
            setup_error = Some(e);
        }
    });
    if let Some(e) = setup_error {
        return Err(e);
    }
    JsFuture::from(promise).await.map_err(AppError::from)?;
    Ok(())
}

/// `gapi.client.init({ apiKey, discoveryDocs })`.
pub async fn init_client(config: &AppConfig) -> Result<(), AppError> {
    let client = lookup(&gapi()?, &["client"])?;
    let init = method(&client, "init")?;

    let opts = Object::new();
    set(&opts, "apiKey", &JsValue::from_str(&config.api_key))?;
    set(&opts, "discoveryDocs", &to_js(&config.discovery_docs())?)?;

    await_thenable(init.call1(&client, &opts).map_err(AppError::from)?).await?;
    debug_log!("gapi client initialized");
    Ok(())
}

/// `gapi.client.setToken({ access_token })`. An empty string clears it.
pub fn set_token(access_token: &str) -> Result<(), AppError> {
    let client = lookup(&gapi()?, &["client"])?;
    let set_token = method(&client, "setToken")?;
    let token = Object::new();
    set(&token, "access_token", &JsValue::from_str(access_token))?;
    set_token.call1(&client, &token).map_err(AppError::from)?;
    Ok(())
}

/// [`SheetsApi`] over `gapi.client.sheets.spreadsheets`.
#[derive(Debug, Clone)]
pub struct GapiSheets {
    spreadsheet_id: String,
}

impl GapiSheets {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    fn spreadsheets() -> Result<JsValue, AppError> {
        lookup(&gapi()?, &["client", "sheets", "spreadsheets"])
    }

    fn base_params(&self) -> Result<Object, AppError> {
        let params = Object::new();
        set(&params, "spreadsheetId", &JsValue::from_str(&self.spreadsheet_id))?;
        Ok(params)
    }

    async fn call(target: &JsValue, name: &str, params: &Object) -> Result<JsValue, AppError> {
        let f = method(target, name)?;
        let response = await_thenable(f.call1(target, params).map_err(AppError::from)?).await?;
        // gapi wraps the JSON body in `result`.
        Ok(Reflect::get(&response, &JsValue::from_str("result")).unwrap_or(JsValue::UNDEFINED))
    }
}

impl SheetsApi for GapiSheets {
    async fn get_values(&self, range: &str) -> Result<ValueRange, AppError> {
        let values_api = lookup(&Self::spreadsheets()?, &["values"])?;
        let params = self.base_params()?;
        set(&params, "range", &JsValue::from_str(range))?;

        let result = Self::call(&values_api, "get", &params).await?;
        if result.is_undefined() {
            return Ok(ValueRange::default());
        }
        serde_wasm_bindgen::from_value(result)
            .map_err(|e| AppError::Remote(format!("unexpected values response: {}", e)))
    }

    async fn update_values(&self, range: &str, values: Vec<Vec<String>>) -> Result<(), AppError> {
        let values_api = lookup(&Self::spreadsheets()?, &["values"])?;
        let params = self.base_params()?;
        set(&params, "range", &JsValue::from_str(range))?;
        set(&params, "valueInputOption", &JsValue::from_str(VALUE_INPUT_OPTION))?;

        let body = ValueRange {
            range: Some(range.to_string()),
            major_dimension: None,
            values,
        };
        set(&params, "resource", &to_js(&body)?)?;

        Self::call(&values_api, "update", &params).await?;
        Ok(())
    }

    async fn batch_update(&self, request: &BatchUpdateRequest) -> Result<(), AppError> {
        let spreadsheets = Self::spreadsheets()?;
        let params = self.base_params()?;
        set(&params, "resource", &to_js(request)?)?;

        Self::call(&spreadsheets, "batchUpdate", &params).await?;
        Ok(())
    }
}
