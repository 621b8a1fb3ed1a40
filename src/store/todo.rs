//! Todo Store
//!
//! Cached projection of the backend's todo list plus loading/error flags.

use serde_json::json;

use super::StoreCell;
use crate::error::{AppError, AppResult};
use crate::gateway::Gateway;
use crate::models::{CreateTodoInput, Todo, TodoStatus, UpdateTodoInput};

const CONTEXT: &str = "TodoStore";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoState {
    /// Last fetched list, patched locally after each successful mutation
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_todos(&self) -> Vec<Todo> {
        self.with_status(TodoStatus::Pending)
    }

    pub fn in_progress_todos(&self) -> Vec<Todo> {
        self.with_status(TodoStatus::InProgress)
    }

    pub fn completed_todos(&self) -> Vec<Todo> {
        self.with_status(TodoStatus::Completed)
    }

    /// Records with an unrecognized status match no view
    fn with_status(&self, status: TodoStatus) -> Vec<Todo> {
        self.todos.iter().filter(|t| t.status == status.as_str()).cloned().collect()
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, error: &AppError) {
        self.loading = false;
        self.error = Some(error.to_string());
    }

    /// Replace the cached copy of a todo by ID
    fn patch(&mut self, updated: Todo) {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == updated.id) {
            *todo = updated;
        }
    }

    fn remove(&mut self, id: i32) {
        self.todos.retain(|t| t.id != id);
    }
}

fn report_failure(store: &impl StoreCell<TodoState>, message: &str, error: &AppError) {
    log::error!(target: CONTEXT, "{} | Data: {}", message, json!(error.to_string()));
    store.modify(|s| s.fail(error));
}

// ========================
// Actions
// ========================

pub async fn fetch_todos(store: &impl StoreCell<TodoState>, gateway: &impl Gateway) {
    log::info!(target: CONTEXT, "Fetching todos...");
    store.modify(TodoState::begin);
    match gateway.fetch_todos().await {
        Ok(todos) => {
            log::info!(target: CONTEXT, "Todos fetched successfully | Data: {}", json!({ "count": todos.len() }));
            store.modify(|s| {
                s.todos = todos;
                s.loading = false;
            });
        }
        Err(e) => report_failure(store, "Failed to fetch todos", &e),
    }
}

/// Replace the cache with the backend's search results
pub async fn search_todos(store: &impl StoreCell<TodoState>, gateway: &impl Gateway, query: &str) {
    log::info!(target: CONTEXT, "Searching todos... | Data: {}", json!({ "query": query }));
    store.modify(TodoState::begin);
    match gateway.search_todos(query).await {
        Ok(todos) => {
            log::info!(target: CONTEXT, "Search completed | Data: {}", json!({ "count": todos.len() }));
            store.modify(|s| {
                s.todos = todos;
                s.loading = false;
            });
        }
        Err(e) => report_failure(store, "Failed to search todos", &e),
    }
}

pub async fn create_todo(
    store: &impl StoreCell<TodoState>,
    gateway: &impl Gateway,
    input: &CreateTodoInput,
) -> AppResult<Todo> {
    log::info!(target: CONTEXT, "Creating todo... | Data: {}", json!(input));
    let input = match input.validate() {
        Ok(input) => input,
        Err(e) => {
            log::warn!(target: CONTEXT, "Rejected todo input: {}", e);
            store.modify(|s| s.error = Some(e.to_string()));
            return Err(e);
        }
    };

    store.modify(TodoState::begin);
    match gateway.create_todo(&input).await {
        Ok(todo) => {
            log::info!(target: CONTEXT, "Todo created successfully | Data: {}", json!({ "id": todo.id }));
            store.modify(|s| {
                s.todos.push(todo.clone());
                s.loading = false;
            });
            Ok(todo)
        }
        Err(e) => {
            report_failure(store, "Failed to create todo", &e);
            Err(e)
        }
    }
}

pub async fn update_todo(
    store: &impl StoreCell<TodoState>,
    gateway: &impl Gateway,
    id: i32,
    input: &UpdateTodoInput,
) -> AppResult<Todo> {
    log::info!(target: CONTEXT, "Updating todo {}... | Data: {}", id, json!(input));
    let input = match input.validate() {
        Ok(input) => input,
        Err(e) => {
            log::warn!(target: CONTEXT, "Rejected update for todo {}: {}", id, e);
            store.modify(|s| s.error = Some(e.to_string()));
            return Err(e);
        }
    };

    store.modify(TodoState::begin);
    match gateway.update_todo(id, &input).await {
        Ok(todo) => {
            log::info!(target: CONTEXT, "Todo {} updated successfully", id);
            store.modify(|s| {
                s.patch(todo.clone());
                s.loading = false;
            });
            Ok(todo)
        }
        Err(e) => {
            report_failure(store, &format!("Failed to update todo {}", id), &e);
            Err(e)
        }
    }
}

pub async fn delete_todo(store: &impl StoreCell<TodoState>, gateway: &impl Gateway, id: i32) -> AppResult<()> {
    log::info!(target: CONTEXT, "Deleting todo {}...", id);
    store.modify(TodoState::begin);
    match gateway.delete_todo(id).await {
        Ok(()) => {
            log::info!(target: CONTEXT, "Todo {} deleted successfully", id);
            store.modify(|s| {
                s.remove(id);
                s.loading = false;
            });
            Ok(())
        }
        Err(e) => {
            report_failure(store, &format!("Failed to delete todo {}", id), &e);
            Err(e)
        }
    }
}

pub async fn toggle_complete(store: &impl StoreCell<TodoState>, gateway: &impl Gateway, id: i32) -> AppResult<Todo> {
    log::info!(target: CONTEXT, "Toggling todo {}...", id);
    store.modify(TodoState::begin);
    match gateway.toggle_complete(id).await {
        Ok(todo) => {
            log::info!(target: CONTEXT, "Todo {} toggled successfully | Data: {}", id, json!({ "status": todo.status }));
            store.modify(|s| {
                s.patch(todo.clone());
                s.loading = false;
            });
            Ok(todo)
        }
        Err(e) => {
            report_failure(store, &format!("Failed to toggle todo {}", id), &e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::gateway::testing::MemoryGateway;
    use crate::models::make_todo;

    fn seeded() -> MemoryGateway {
        MemoryGateway::with_todos(vec![
            make_todo(1, "A", "pending", "2024-03-08 09:00:00", "2024-03-08 09:00:00"),
            make_todo(2, "B", "completed", "2024-03-08 10:00:00", "2024-03-09 10:00:00"),
            make_todo(3, "A", "in_progress", "2024-03-09 10:00:00", "2024-03-09 10:00:00"),
        ])
    }

    fn new_store() -> Rc<RefCell<TodoState>> {
        Rc::new(RefCell::new(TodoState::new()))
    }

    #[tokio::test]
    async fn test_fetch_replaces_cache() {
        let store = new_store();
        store.borrow_mut().todos = vec![make_todo(99, "Z", "pending", "", "")];
        fetch_todos(&store, &seeded()).await;

        let state = store.borrow();
        assert_eq!(state.todos.len(), 3);
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.pending_todos().len(), 1);
        assert_eq!(state.in_progress_todos()[0].id, 3);
        assert_eq!(state.completed_todos()[0].id, 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_error_and_keeps_cache() {
        let store = new_store();
        let gateway = seeded();
        fetch_todos(&store, &gateway).await;

        gateway.fail_next("database is locked");
        fetch_todos(&store, &gateway).await;
        let state = store.borrow();
        assert_eq!(state.error.as_deref(), Some("database is locked"));
        assert!(!state.loading);
        assert_eq!(state.todos.len(), 3);
    }

    #[tokio::test]
    async fn test_create_trims_and_appends() {
        let store = new_store();
        let gateway = seeded();
        fetch_todos(&store, &gateway).await;

        let input = CreateTodoInput::new("  Send report ", TodoStatus::Pending, " C ");
        let created = create_todo(&store, &gateway, &input).await.unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(created.title, "Send report");
        assert_eq!(created.broker, "C");
        assert_eq!(store.borrow().todos.last(), Some(&created));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_calling_backend() {
        let store = new_store();
        let gateway = seeded();
        let input = CreateTodoInput::new("title", TodoStatus::Pending, "   ");
        let err = create_todo(&store, &gateway, &input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(gateway.calls.get(), 0);
        assert!(store.borrow().error.is_some());
    }

    #[tokio::test]
    async fn test_update_patches_in_place() {
        let store = new_store();
        let gateway = seeded();
        fetch_todos(&store, &gateway).await;

        let input = UpdateTodoInput { status: Some(TodoStatus::Completed), ..Default::default() };
        update_todo(&store, &gateway, 1, &input).await.unwrap();
        let state = store.borrow();
        assert_eq!(state.todos[0].status, "completed");
        assert_eq!(state.completed_todos().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_cache_unchanged() {
        let store = new_store();
        let gateway = seeded();
        fetch_todos(&store, &gateway).await;
        let before = store.borrow().todos.clone();

        gateway.fail_next("todo not found");
        assert!(delete_todo(&store, &gateway, 1).await.is_err());
        gateway.fail_next("validation failed");
        let input = UpdateTodoInput { title: Some("x".into()), ..Default::default() };
        assert!(update_todo(&store, &gateway, 2, &input).await.is_err());

        let state = store.borrow();
        assert_eq!(state.todos, before);
        assert_eq!(state.error.as_deref(), Some("validation failed"));
    }

    #[tokio::test]
    async fn test_delete_and_toggle() {
        let store = new_store();
        let gateway = seeded();
        fetch_todos(&store, &gateway).await;

        delete_todo(&store, &gateway, 3).await.unwrap();
        let toggled = toggle_complete(&store, &gateway, 1).await.unwrap();
        assert!(toggled.is_completed());

        let state = store.borrow();
        assert_eq!(state.todos.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(state.todos[0].is_completed());
    }

    #[tokio::test]
    async fn test_overlapping_updates_settle_independently() {
        let store = new_store();
        let gateway = seeded();
        fetch_todos(&store, &gateway).await;

        // first call answers after the second one
        gateway.delay_next(3);
        gateway.delay_next(0);
        let slow = UpdateTodoInput { title: Some("slow".into()), ..Default::default() };
        let fast = UpdateTodoInput { title: Some("fast".into()), ..Default::default() };
        let (first, second) = tokio::join!(
            update_todo(&store, &gateway, 1, &slow),
            update_todo(&store, &gateway, 1, &fast),
        );
        assert_eq!(first.unwrap().title, "slow");
        assert_eq!(second.unwrap().title, "fast");

        let state = store.borrow();
        assert_eq!(state.todos[0].title, "slow");
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_search_replaces_cache() {
        let store = new_store();
        let gateway = seeded();
        fetch_todos(&store, &gateway).await;
        search_todos(&store, &gateway, "Todo 2").await;
        assert_eq!(store.borrow().todos.len(), 1);
    }
}
