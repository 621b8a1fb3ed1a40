//! UI Components
//!
//! Reusable Leptos components.

mod status_selector;
mod delete_confirm_button;
mod quick_add_form;
mod todo_list;
mod stats_panel;
mod report_panel;

pub use status_selector::StatusSelector;
pub use delete_confirm_button::DeleteConfirmButton;
pub use quick_add_form::QuickAddForm;
pub use todo_list::TodoList;
pub use stats_panel::StatsPanel;
pub use report_panel::ReportPanel;
