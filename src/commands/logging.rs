//! Log Forwarding Command

use serde::Serialize;

use super::{call_unit, to_args};
use crate::error::AppResult;

#[derive(Serialize)]
struct LogArgs<'a> {
    level: &'a str,
    message: &'a str,
    context: Option<&'a str>,
}

/// Append a frontend record to the backend log file
pub async fn log_from_frontend(level: &str, message: &str, context: Option<&str>) -> AppResult<()> {
    let js_args = to_args(&LogArgs { level, message, context })?;
    call_unit("log_from_frontend", js_args).await
}
