//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod todo;
mod broker;
mod logging;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::{AppError, AppResult};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// True inside the Tauri webview, where `window.__TAURI__` is injected
pub fn is_tauri() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("__TAURI__")).unwrap_or(false))
        .unwrap_or(false)
}

/// Invoke `cmd` and decode its response
async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> AppResult<T> {
    let result = invoke(cmd, args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| AppError::Decode(e.to_string()))
}

/// Invoke `cmd` and ignore its response
async fn call_unit(cmd: &str, args: JsValue) -> AppResult<()> {
    invoke(cmd, args).await.map(|_| ()).map_err(rejection)
}

fn to_args<A: Serialize>(args: &A) -> AppResult<JsValue> {
    serde_wasm_bindgen::to_value(args).map_err(|e| AppError::Decode(e.to_string()))
}

/// Tauri rejects with the serialized command error, usually a plain string
fn rejection(err: JsValue) -> AppError {
    AppError::Backend(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

// Re-export all public items
pub use todo::*;
pub use broker::*;
pub use logging::*;
