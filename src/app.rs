//! Broker Todo Frontend App
//!
//! Main application component: todo list on the left, statistics and
//! reports on the right.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{QuickAddForm, ReportPanel, StatsPanel, TodoList};
use crate::context::AppContext;
use crate::preferences::LocalStorage;
use crate::store::{self, BrokerState, StoreCell, TodoState, ViewState};

#[component]
pub fn App() -> impl IntoView {
    // State
    let todos = RwSignal::new(TodoState::new());
    let brokers = RwSignal::new(BrokerState::new());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let ctx = AppContext::new(todos, brokers, (reload_trigger, set_reload_trigger));
    provide_context(ctx);
    provide_context(Store::new(ViewState::default()));

    // Last used broker is read once at startup
    brokers.modify(|s| s.load_last_used_broker(&LocalStorage));

    // Load todos and broker pool on mount and on every reload
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading todos, trigger={}", trigger).into());
        spawn_local(async move {
            let gateway = ctx.gateway();
            store::fetch_todos(&ctx.todos, &gateway).await;
            store::fetch_broker_pool(&ctx.brokers, &gateway).await;
        });
    });

    view! {
        <div class="app-layout">
            <main class="main-content">
                <h1>"券商待办"</h1>
                <QuickAddForm />
                <TodoList />
                <p class="todo-count">
                    {move || todos.with(|s| format!("{} todos, {} brokers", s.todos.len(), brokers.with(|b| b.brokers.len())))}
                </p>
            </main>

            <aside class="side-panel">
                <StatsPanel />
                <ReportPanel />
            </aside>
        </div>
    }
}
