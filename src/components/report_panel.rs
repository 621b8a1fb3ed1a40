//! Report Panel Component
//!
//! Picks the report period, previews the plain-text rendering and exports
//! Markdown or text files.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::date_utils::{self, DateRange};
use crate::export::{self, BrowserDownload};
use crate::report::{ReportData, ReportFormat, ReportGenerator, ReportKind};
use crate::store::{use_view_store, ViewStateStoreFields};

#[component]
pub fn ReportPanel() -> impl IntoView {
    let ctx = use_app_context();
    let view_store = use_view_store();
    let generator = StoredValue::new(ReportGenerator::default());

    let (custom_start, set_custom_start) = signal(String::new());
    let (custom_end, set_custom_end) = signal(String::new());
    let (message, set_message) = signal::<Option<(bool, String)>>(None);

    let kind = move || view_store.report_kind().get();

    let custom_range = move || {
        let start = date_utils::parse_day(&custom_start.get())?;
        let end = date_utils::parse_day(&custom_end.get())?;
        Some(DateRange::from_days(start, end))
    };

    let report_data = move || {
        let kind = kind();
        let range = kind.resolve_range(custom_range(), date_utils::now());
        ctx.todos.with(|s| ReportData::collect(kind, range, &s.todos))
    };

    let preview = move || generator.with_value(|g| g.text(&report_data(), date_utils::now()));

    let export_as = move |format: ReportFormat| {
        let data = report_data();
        let result = generator.with_value(|g| {
            export::export_report(g, &BrowserDownload, format, &data, date_utils::now())
        });
        match result {
            Ok(exported) => set_message.set(Some((true, format!("已导出 {}", exported.file_name)))),
            Err(_) => set_message.set(Some((false, "导出失败".to_string()))),
        }
    };

    view! {
        <section class="report-panel">
            <div class="report-header">
                <h2>"工作报告"</h2>
                <select on:change=move |ev| {
                    if let Some(k) = ReportKind::parse(&event_target_value(&ev)) {
                        view_store.report_kind().set(k);
                    }
                }>
                    {ReportKind::ALL.into_iter().map(|k| {
                        let label = generator.with_value(|g| g.labels().title(k).to_string());
                        view! { <option value=k.as_str() selected={move || kind() == k}>{label}</option> }
                    }).collect_view()}
                </select>
            </div>

            <Show when=move || kind() == ReportKind::Custom>
                <div class="report-custom-range">
                    <input
                        type="date"
                        prop:value=move || custom_start.get()
                        on:input=move |ev| set_custom_start.set(event_target_value(&ev))
                    />
                    <span>"至"</span>
                    <input
                        type="date"
                        prop:value=move || custom_end.get()
                        on:input=move |ev| set_custom_end.set(event_target_value(&ev))
                    />
                </div>
            </Show>

            <pre class="report-preview">{preview}</pre>

            <div class="report-actions">
                <button on:click=move |_| export_as(ReportFormat::Markdown)>"导出 Markdown"</button>
                <button on:click=move |_| export_as(ReportFormat::Text)>"导出文本"</button>
            </div>

            {move || message.get().map(|(ok, text)| view! {
                <div class={if ok { "report-message success" } else { "report-message error" }}>{text}</div>
            })}
        </section>
    }
}
