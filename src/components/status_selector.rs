//! Status Selector Component
//!
//! Reusable todo status selector buttons.

use leptos::prelude::*;

use crate::models::TodoStatus;

/// Status selector buttons for todos
#[component]
pub fn StatusSelector(
    #[prop(into)] current: Signal<TodoStatus>,
    on_change: impl Fn(TodoStatus) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="status-selector">
            {TodoStatus::ALL.into_iter().map(|status| {
                let is_selected = move || current.get() == status;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "status-btn active" } else { "status-btn" }
                        on:click=move |_| on_change(status)
                    >
                        {format!("{} {}", status.icon(), status.label())}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
