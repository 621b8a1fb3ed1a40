//! Remote Data Gateway
//!
//! The seam between the stores and the backend process. The Tauri
//! implementation forwards to `commands`; tests substitute an in-memory one.

use async_trait::async_trait;

use crate::commands;
use crate::error::AppResult;
use crate::models::{CreateTodoInput, Todo, UpdateTodoInput};

/// Backend operations for todos and brokers.
///
/// Futures are `!Send`: on wasm they hold `JsValue`s.
#[async_trait(?Send)]
pub trait Gateway {
    async fn fetch_todos(&self) -> AppResult<Vec<Todo>>;

    async fn create_todo(&self, input: &CreateTodoInput) -> AppResult<Todo>;

    async fn update_todo(&self, id: i32, input: &UpdateTodoInput) -> AppResult<Todo>;

    async fn delete_todo(&self, id: i32) -> AppResult<()>;

    async fn search_todos(&self, query: &str) -> AppResult<Vec<Todo>>;

    async fn toggle_complete(&self, id: i32) -> AppResult<Todo>;

    async fn fetch_broker_pool(&self) -> AppResult<Vec<String>>;
}

/// Gateway backed by `window.__TAURI__.core.invoke`
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriGateway;

#[async_trait(?Send)]
impl Gateway for TauriGateway {
    async fn fetch_todos(&self) -> AppResult<Vec<Todo>> {
        commands::get_todos().await
    }

    async fn create_todo(&self, input: &CreateTodoInput) -> AppResult<Todo> {
        commands::create_todo(input).await
    }

    async fn update_todo(&self, id: i32, input: &UpdateTodoInput) -> AppResult<Todo> {
        commands::update_todo(id, input).await
    }

    async fn delete_todo(&self, id: i32) -> AppResult<()> {
        commands::delete_todo(id).await
    }

    async fn search_todos(&self, query: &str) -> AppResult<Vec<Todo>> {
        commands::search_todos(query).await
    }

    async fn toggle_complete(&self, id: i32) -> AppResult<Todo> {
        commands::toggle_todo_complete(id).await
    }

    async fn fetch_broker_pool(&self) -> AppResult<Vec<String>> {
        commands::get_broker_pool().await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory backend double

    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use super::*;
    use crate::error::AppError;
    use crate::models::TodoStatus;

    pub const NOW: &str = "2024-03-10 12:00:00";

    #[derive(Default)]
    pub struct MemoryGateway {
        pub todos: RefCell<Vec<Todo>>,
        next_id: Cell<i32>,
        failure: RefCell<Option<String>>,
        delays: RefCell<VecDeque<usize>>,
        pub calls: Cell<usize>,
    }

    impl MemoryGateway {
        pub fn with_todos(todos: Vec<Todo>) -> Self {
            let next_id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            Self { todos: RefCell::new(todos), next_id: Cell::new(next_id), ..Default::default() }
        }

        /// Make the next call reject with `message`
        pub fn fail_next(&self, message: &str) {
            *self.failure.borrow_mut() = Some(message.to_string());
        }

        /// Queue a delay of `yields` scheduler turns for the next call to start
        pub fn delay_next(&self, yields: usize) {
            self.delays.borrow_mut().push_back(yields);
        }

        async fn enter(&self) -> AppResult<()> {
            let yields = self.delays.borrow_mut().pop_front().unwrap_or(0);
            for _ in 0..yields {
                tokio::task::yield_now().await;
            }
            self.calls.set(self.calls.get() + 1);
            match self.failure.borrow_mut().take() {
                Some(message) => Err(AppError::Backend(message)),
                None => Ok(()),
            }
        }

        fn modify(&self, id: i32, f: impl FnOnce(&mut Todo)) -> AppResult<Todo> {
            let mut todos = self.todos.borrow_mut();
            let todo = todos
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| AppError::Backend(format!("todo {} not found", id)))?;
            f(todo);
            todo.updated_at = NOW.to_string();
            Ok(todo.clone())
        }
    }

    #[async_trait(?Send)]
    impl Gateway for MemoryGateway {
        async fn fetch_todos(&self) -> AppResult<Vec<Todo>> {
            self.enter().await?;
            Ok(self.todos.borrow().clone())
        }

        async fn create_todo(&self, input: &CreateTodoInput) -> AppResult<Todo> {
            self.enter().await?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let todo = Todo {
                id,
                title: input.title.clone(),
                status: input.status.as_str().to_string(),
                broker: input.broker.clone(),
                created_at: NOW.to_string(),
                updated_at: NOW.to_string(),
            };
            self.todos.borrow_mut().push(todo.clone());
            Ok(todo)
        }

        async fn update_todo(&self, id: i32, input: &UpdateTodoInput) -> AppResult<Todo> {
            self.enter().await?;
            self.modify(id, |todo| {
                if let Some(title) = &input.title {
                    todo.title = title.clone();
                }
                if let Some(status) = input.status {
                    todo.status = status.as_str().to_string();
                }
                if let Some(broker) = &input.broker {
                    todo.broker = broker.clone();
                }
            })
        }

        async fn delete_todo(&self, id: i32) -> AppResult<()> {
            self.enter().await?;
            self.todos.borrow_mut().retain(|t| t.id != id);
            Ok(())
        }

        async fn search_todos(&self, query: &str) -> AppResult<Vec<Todo>> {
            self.enter().await?;
            Ok(self.todos.borrow().iter().filter(|t| t.title.contains(query)).cloned().collect())
        }

        async fn toggle_complete(&self, id: i32) -> AppResult<Todo> {
            self.enter().await?;
            self.modify(id, |todo| {
                let next = if todo.is_completed() { TodoStatus::Pending } else { TodoStatus::Completed };
                todo.status = next.as_str().to_string();
            })
        }

        async fn fetch_broker_pool(&self) -> AppResult<Vec<String>> {
            self.enter().await?;
            let mut brokers: Vec<String> = Vec::new();
            for todo in self.todos.borrow().iter() {
                if !brokers.contains(&todo.broker) {
                    brokers.push(todo.broker.clone());
                }
            }
            Ok(brokers)
        }
    }
}
