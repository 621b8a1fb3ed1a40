//! Broker Commands

use wasm_bindgen::prelude::*;

use super::call;
use crate::error::AppResult;

/// Distinct broker names known to the backend
pub async fn get_broker_pool() -> AppResult<Vec<String>> {
    call("get_broker_pool", JsValue::NULL).await
}
