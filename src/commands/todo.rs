//! Todo Commands
//!
//! Frontend bindings for todo-related backend commands.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{call, call_unit, to_args};
use crate::error::AppResult;
use crate::models::{CreateTodoInput, Todo, UpdateTodoInput};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CreateTodoArgs<'a> {
    title: &'a str,
    status: &'a str,
    broker: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTodoPayload<'a> {
    todo_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    broker: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TodoIdPayload {
    todo_id: i32,
}

/// Commands taking a DTO expect it under `input`
#[derive(Serialize)]
struct InputArgs<T> {
    input: T,
}

#[derive(Serialize)]
struct IdArgs {
    id: i32,
}

#[derive(Serialize)]
struct SearchArgs<'a> {
    query: &'a str,
}

// ========================
// Commands
// ========================

pub async fn get_todos() -> AppResult<Vec<Todo>> {
    call("get_todos", JsValue::NULL).await
}

pub async fn create_todo(input: &CreateTodoInput) -> AppResult<Todo> {
    let js_args = to_args(&CreateTodoArgs {
        title: &input.title,
        status: input.status.as_str(),
        broker: &input.broker,
    })?;
    call("create_todo", js_args).await
}

pub async fn update_todo(id: i32, input: &UpdateTodoInput) -> AppResult<Todo> {
    let js_args = to_args(&InputArgs {
        input: UpdateTodoPayload {
            todo_id: id,
            title: input.title.as_deref(),
            status: input.status.map(|s| s.as_str()),
            broker: input.broker.as_deref(),
        },
    })?;
    call("update_todo", js_args).await
}

pub async fn delete_todo(id: i32) -> AppResult<()> {
    let js_args = to_args(&InputArgs { input: TodoIdPayload { todo_id: id } })?;
    call_unit("delete_todo", js_args).await
}

pub async fn search_todos(query: &str) -> AppResult<Vec<Todo>> {
    let js_args = to_args(&SearchArgs { query })?;
    call("search_todos", js_args).await
}

pub async fn toggle_todo_complete(id: i32) -> AppResult<Todo> {
    let js_args = to_args(&IdArgs { id })?;
    call("toggle_todo_complete", js_args).await
}
