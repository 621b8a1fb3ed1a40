//! Frontend Logger
//!
//! `log` backend that writes to the webview console and forwards each
//! record to the backend log file. Forwarding is fire-and-forget; if it
//! fails the failure goes to the console only.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::commands;

#[derive(Debug, Clone, Copy)]
pub struct FrontendLogger {
    forward: bool,
}

impl FrontendLogger {
    pub fn new(forward: bool) -> Self {
        Self { forward }
    }

    /// Whether records are also sent to the backend log file
    pub fn forwards(&self) -> bool {
        self.forward
    }
}

/// Install the logger. A second call is a no-op.
///
/// Pass `forward = false` outside the Tauri webview, where there is no
/// backend to receive records.
pub fn init(level: LevelFilter, forward: bool) {
    if log::set_boxed_logger(Box::new(FrontendLogger::new(forward))).is_ok() {
        log::set_max_level(level);
    }
}

pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

/// `[LEVEL] [context] message`
pub fn format_line(level: Level, context: Option<&str>, message: &str) -> String {
    match context.filter(|c| !c.is_empty()) {
        Some(context) => format!("[{}] [{}] {}", level_name(level).to_uppercase(), context, message),
        None => format!("[{}] {}", level_name(level).to_uppercase(), message),
    }
}

impl Log for FrontendLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = record.level();
        let context = record.target().to_string();
        let message = record.args().to_string();

        let line = JsValue::from_str(&format_line(level, Some(&context), &message));
        match level {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug => web_sys::console::debug_1(&line),
            Level::Trace => web_sys::console::log_1(&line),
        }

        if self.forward {
            spawn_local(async move {
                if let Err(e) = commands::log_from_frontend(level_name(level), &message, Some(&context)).await {
                    web_sys::console::error_1(&format!("Failed to send log to backend: {}", e).into());
                }
            });
        }
    }

    fn flush(&self) {}
}
