//! Quick Add Form Component
//!
//! Creates a todo for a broker; remembers the broker for next time.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::StatusSelector;
use crate::context::use_app_context;
use crate::models::{CreateTodoInput, TodoStatus};
use crate::preferences::LocalStorage;
use crate::store::{self, StoreCell};

#[component]
pub fn QuickAddForm() -> impl IntoView {
    let ctx = use_app_context();

    let (title, set_title) = signal(String::new());
    let (broker, set_broker) = signal(String::new());
    let (status, set_status) = signal(TodoStatus::Pending);

    // Prefill with the last broker once it has been loaded
    Effect::new(move |_| {
        if let Some(last) = ctx.brokers.with(|s| s.last_used_broker.clone()) {
            if broker.get_untracked().is_empty() {
                set_broker.set(last);
            }
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = CreateTodoInput::new(title.get(), status.get(), broker.get());

        spawn_local(async move {
            if let Ok(todo) = store::create_todo(&ctx.todos, &ctx.gateway(), &input).await {
                set_title.set(String::new());
                ctx.brokers.modify(|s| {
                    s.add_broker(&todo.broker);
                    s.set_last_used_broker(&todo.broker, &LocalStorage);
                });
            }
        });
    };

    let brokers = move || ctx.brokers.with(|s| s.brokers.clone());

    view! {
        <form class="quick-add-form" on:submit=on_submit>
            <div class="quick-add-row">
                <input
                    type="text"
                    placeholder="任务标题..."
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    list="broker-pool"
                    placeholder="券商"
                    prop:value=move || broker.get()
                    on:input=move |ev| set_broker.set(event_target_value(&ev))
                    on:change=move |ev| {
                        let selected = event_target_value(&ev);
                        ctx.brokers.modify(|s| {
                            s.set_last_used_broker(&selected, &LocalStorage);
                        });
                    }
                />
                <datalist id="broker-pool">
                    {move || brokers().into_iter().map(|name| view! { <option value=name.clone()></option> }).collect_view()}
                </datalist>
                <button type="submit" disabled=move || ctx.todos.with(|s| s.loading)>"添加"</button>
            </div>
            <StatusSelector current=status on_change=move |s| set_status.set(s) />
        </form>
    }
}
