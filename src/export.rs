//! Report Export
//!
//! Renders a report and hands it to a sink. The webview saves it as a
//! browser download; native hosts and tests write into a directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::{AppError, AppResult};
use crate::report::{ReportData, ReportFormat, ReportGenerator};

const CONTEXT: &str = "ReportExport";

/// Destination for a finished report
pub trait ExportSink {
    fn save(&self, file_name: &str, format: ReportFormat, content: &str) -> AppResult<()>;
}

/// A report that was saved successfully
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedReport {
    pub file_name: String,
    pub content: String,
}

/// Render `data` as `format` and save it through `sink`.
///
/// On failure the rendered text is discarded; nothing is retried.
pub fn export_report(
    generator: &ReportGenerator,
    sink: &impl ExportSink,
    format: ReportFormat,
    data: &ReportData,
    now: NaiveDateTime,
) -> AppResult<ExportedReport> {
    let content = generator.generate(format, data, now);
    let file_name = generator.file_name(format, now);
    match sink.save(&file_name, format, &content) {
        Ok(()) => {
            log::info!(target: CONTEXT, "Exported {}", file_name);
            Ok(ExportedReport { file_name, content })
        }
        Err(e) => {
            log::error!(target: CONTEXT, "Export {} failed | Data: {}", format.extension(), e);
            Err(e)
        }
    }
}

// ========================
// Browser download
// ========================

/// Blob + object URL + synthetic anchor click
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownload;

fn js_err(err: JsValue) -> AppError {
    AppError::Export(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl ExportSink for BrowserDownload {
    fn save(&self, file_name: &str, format: ReportFormat, content: &str) -> AppResult<()> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AppError::Export("no document".to_string()))?;
        let body = document.body().ok_or_else(|| AppError::Export("no body".to_string()))?;

        let parts = js_sys::Array::of1(&JsValue::from_str(content));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(format.mime_type());
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| AppError::Export("anchor element expected".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);

        body.append_child(&anchor).map_err(js_err)?;
        anchor.click();
        body.remove_child(&anchor).map_err(js_err)?;
        web_sys::Url::revoke_object_url(&url).map_err(js_err)
    }
}

// ========================
// Directory
// ========================

#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&self, file_name: &str, _format: ReportFormat, content: &str) -> AppResult<()> {
        fs::write(self.dir.join(file_name), content.as_bytes())
            .map_err(|e| AppError::Export(format!("{}: {}", file_name, e)))
    }
}
