//! Statistics Panel Component
//!
//! Status cards, per-broker breakdown and the daily trend for the
//! selected window.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::{Todo, TodoStatus};
use crate::stats::{self, BrokerDetail, StatusStats, TrendSeries};
use crate::store::{use_view_store, StatsWindow, ViewStateStoreFields};

#[component]
pub fn StatsPanel() -> impl IntoView {
    let ctx = use_app_context();
    let view_store = use_view_store();

    let window = move || view_store.stats_window().get();

    // Todos created inside the selected window
    let filtered = move || {
        let range = window().range();
        ctx.todos.with(|s| match range {
            Some(range) => stats::filter_by_created(&s.todos, &range),
            None => s.todos.clone(),
        })
    };

    // Trend always scans the whole cache
    let trend = move || {
        let range = window().range();
        ctx.todos.with(|s| stats::time_trend(range.as_ref(), &s.todos))
    };

    let summary = move || {
        let todos = filtered();
        let status = stats::status_stats(&todos);
        let brokers = stats::broker_stats_detailed(&todos);
        match (status, brokers) {
            (Ok(status), Ok(brokers)) => {
                let rows: Vec<(String, BrokerDetail)> =
                    brokers.iter().map(|(name, detail)| (name.to_string(), detail.clone())).collect();
                view! {
                    <StatusCards stats=status />
                    <BrokerTable rows=rows />
                }
                .into_any()
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!(target: "StatsPanel", "Statistics unavailable: {}", e);
                view! { <div class="error-banner">{e.to_string()}</div> }.into_any()
            }
        }
    };

    view! {
        <section class="stats-panel">
            <div class="stats-header">
                <h2>"统计"</h2>
                <select on:change=move |ev| {
                    if let Some(w) = StatsWindow::parse(&event_target_value(&ev)) {
                        view_store.stats_window().set(w);
                    }
                }>
                    {StatsWindow::ALL.into_iter().map(|w| view! {
                        <option value=w.as_str() selected={move || window() == w}>{w.label()}</option>
                    }).collect_view()}
                </select>
            </div>
            {summary}
            {move || view! { <TrendTable series=trend() /> }}
        </section>
    }
}

#[component]
fn StatusCards(stats: StatusStats) -> impl IntoView {
    view! {
        <div class="status-cards">
            {TodoStatus::ALL.into_iter().map(|status| view! {
                <div class={format!("status-card {}", status.color())}>
                    <span class="status-card-icon">{status.icon()}</span>
                    <span class="status-card-label">{status.label()}</span>
                    <span class="status-card-count">{stats.get(status)}</span>
                </div>
            }).collect_view()}
            <div class="status-card total">
                <span class="status-card-label">"合计"</span>
                <span class="status-card-count">{stats.total()}</span>
            </div>
        </div>
    }
}

#[component]
fn BrokerTable(rows: Vec<(String, BrokerDetail)>) -> impl IntoView {
    let titles = |todos: &[Todo]| todos.iter().map(|t| t.title.clone()).collect::<Vec<_>>().join("、");

    view! {
        <table class="broker-table">
            <thead>
                <tr>
                    <th>"券商"</th>
                    {TodoStatus::ALL.into_iter().map(|s| view! { <th>{s.label()}</th> }).collect_view()}
                    <th>"合计"</th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|(name, detail)| view! {
                    <tr>
                        <td class="broker-name">{name}</td>
                        {TodoStatus::ALL.into_iter().map(|s| {
                            let list = detail.list(s);
                            view! { <td title={titles(list)}>{list.len()}</td> }
                        }).collect_view()}
                        <td>{detail.total}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn TrendTable(series: TrendSeries) -> impl IntoView {
    view! {
        <table class="trend-table">
            <thead>
                <tr><th>"日期"</th><th>"新建"</th><th>"完成"</th></tr>
            </thead>
            <tbody>
                {series.points.into_iter().map(|p| view! {
                    <tr><td>{p.label}</td><td>{p.created}</td><td>{p.completed}</td></tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}
