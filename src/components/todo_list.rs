//! Todo List Component
//!
//! Status tabs, backend search, and one row per cached todo.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::{Todo, TodoStatus, UpdateTodoInput};
use crate::store::{self, use_view_store, ViewStateStoreFields};

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_app_context();
    let view_store = use_view_store();

    let visible = move || {
        let filter = view_store.status_filter().get();
        ctx.todos.with(|s| match filter {
            None => s.todos.clone(),
            Some(TodoStatus::Pending) => s.pending_todos(),
            Some(TodoStatus::InProgress) => s.in_progress_todos(),
            Some(TodoStatus::Completed) => s.completed_todos(),
        })
    };

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let query = view_store.search_query().get();
        spawn_local(async move {
            if query.trim().is_empty() {
                store::fetch_todos(&ctx.todos, &ctx.gateway()).await;
            } else {
                store::search_todos(&ctx.todos, &ctx.gateway(), &query).await;
            }
        });
    };

    let tab = move |filter: Option<TodoStatus>, label: &'static str| {
        view! {
            <button
                class=move || if view_store.status_filter().get() == filter { "tab active" } else { "tab" }
                on:click=move |_| view_store.status_filter().set(filter)
            >
                {label}
            </button>
        }
    };

    view! {
        <section class="todo-list">
            <div class="todo-tabs">
                {tab(None, "全部")}
                {TodoStatus::ALL.into_iter().map(|s| tab(Some(s), s.label())).collect_view()}
            </div>

            <form class="todo-search" on:submit=on_search>
                <input
                    type="search"
                    placeholder="搜索任务..."
                    prop:value=move || view_store.search_query().get()
                    on:input=move |ev| view_store.search_query().set(event_target_value(&ev))
                />
            </form>

            {move || ctx.todos.with(|s| s.error.clone()).map(|error| view! {
                <div class="error-banner">
                    <span>{error}</span>
                    <button on:click=move |_| ctx.reload()>"重试"</button>
                </div>
            })}

            <Show when=move || ctx.todos.with(|s| s.loading)>
                <div class="loading">"加载中..."</div>
            </Show>

            <ul class="todo-rows">
                <For
                    each=visible
                    key=|todo| (todo.id, todo.status.clone(), todo.title.clone(), todo.updated_at.clone())
                    children=move |todo| view! { <TodoRow todo=todo /> }
                />
            </ul>
        </section>
    }
}

#[component]
fn TodoRow(todo: Todo) -> impl IntoView {
    let ctx = use_app_context();
    let id = todo.id;
    let status = todo.status().ok();
    let completed = todo.is_completed();
    let row_class = if completed { "todo-row completed" } else { "todo-row" };

    let on_toggle = move |_| {
        spawn_local(async move {
            let _ = store::toggle_complete(&ctx.todos, &ctx.gateway(), id).await;
        });
    };

    let on_status = move |ev: web_sys::Event| {
        let Some(next) = TodoStatus::parse(&event_target_value(&ev)) else { return };
        let input = UpdateTodoInput { status: Some(next), ..Default::default() };
        spawn_local(async move {
            let _ = store::update_todo(&ctx.todos, &ctx.gateway(), id, &input).await;
        });
    };

    let on_delete = Callback::new(move |_: ()| {
        spawn_local(async move {
            let _ = store::delete_todo(&ctx.todos, &ctx.gateway(), id).await;
        });
    });

    view! {
        <li class=row_class>
            <input type="checkbox" prop:checked=completed on:change=on_toggle />
            <span class="todo-icon">{status.map(|s| s.icon()).unwrap_or("❓")}</span>
            <span class="todo-title">{todo.title.clone()}</span>
            <span class="todo-broker">{todo.broker.clone()}</span>
            <select class="todo-status" on:change=on_status>
                {TodoStatus::ALL.into_iter().map(|s| view! {
                    <option value=s.as_str() selected={status == Some(s)}>{s.label()}</option>
                }).collect_view()}
            </select>
            <span class="todo-created">{todo.created_at.clone()}</span>
            <DeleteConfirmButton on_confirm=on_delete />
        </li>
    }
}
