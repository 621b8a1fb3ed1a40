//! Frontend Models
//!
//! Data structures matching backend entities.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Validation limits shared with the backend
pub mod validation {
    pub const TITLE_MIN_LENGTH: usize = 1;
    pub const TITLE_MAX_LENGTH: usize = 500;
    pub const BROKER_MIN_LENGTH: usize = 1;
    pub const BROKER_MAX_LENGTH: usize = 100;
}

/// Backend timestamp layout (local time, no zone)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Todo status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Pending,
    InProgress,
    Completed,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Wire value used by the backend
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "待办",
            Self::InProgress => "进行中",
            Self::Completed => "已完成",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Pending => "⭕",
            Self::InProgress => "🔄",
            Self::Completed => "✅",
        }
    }

    /// CSS modifier class for status badges
    pub fn color(self) -> &'static str {
        match self {
            Self::Pending => "default",
            Self::InProgress => "info",
            Self::Completed => "success",
        }
    }
}

/// Todo data structure (matches backend)
///
/// Status and timestamps are kept as the backend sends them; the typed
/// accessors below report integrity problems instead of hiding them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub status: String,
    pub broker: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Todo {
    pub fn status(&self) -> AppResult<TodoStatus> {
        TodoStatus::parse(&self.status).ok_or_else(|| AppError::UnknownStatus {
            id: self.id,
            status: self.status.clone(),
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == TodoStatus::Completed.as_str()
    }

    pub fn created_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }

    pub fn updated_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.updated_at)
    }
}

/// Parse a backend timestamp into local calendar time.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, the `T`-separated variant, and RFC 3339
/// (whose wall-clock fields are kept as-is).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_local()))
}

/// Input for creating a todo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTodoInput {
    pub title: String,
    pub status: TodoStatus,
    pub broker: String,
}

impl CreateTodoInput {
    pub fn new(title: impl Into<String>, status: TodoStatus, broker: impl Into<String>) -> Self {
        Self { title: title.into(), status, broker: broker.into() }
    }

    /// Trim and check lengths; returns the sanitized input.
    pub fn validate(&self) -> AppResult<Self> {
        Ok(Self {
            title: check_title(&self.title)?,
            status: self.status,
            broker: check_broker(&self.broker)?,
        })
    }
}

/// Partial update for a todo; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTodoInput {
    pub title: Option<String>,
    pub status: Option<TodoStatus>,
    pub broker: Option<String>,
}

impl UpdateTodoInput {
    pub fn validate(&self) -> AppResult<Self> {
        Ok(Self {
            title: self.title.as_deref().map(check_title).transpose()?,
            status: self.status,
            broker: self.broker.as_deref().map(check_broker).transpose()?,
        })
    }
}

fn check_title(title: &str) -> AppResult<String> {
    check_length(title, validation::TITLE_MIN_LENGTH, validation::TITLE_MAX_LENGTH, "标题")
}

fn check_broker(broker: &str) -> AppResult<String> {
    check_length(broker, validation::BROKER_MIN_LENGTH, validation::BROKER_MAX_LENGTH, "券商名称")
}

fn check_length(value: &str, min: usize, max: usize, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!("{}长度必须在 {}-{} 字符之间", field, min, max)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(crate) fn make_todo(id: i32, broker: &str, status: &str, created_at: &str, updated_at: &str) -> Todo {
    Todo {
        id,
        title: format!("Todo {}", id),
        status: status.to_string(),
        broker: broker.to_string(),
        created_at: created_at.to_string(),
        updated_at: updated_at.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_wire_values() {
        for status in TodoStatus::ALL {
            assert_eq!(TodoStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(serde_json::to_string(&TodoStatus::InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(TodoStatus::parse("done"), None);
    }

    #[test]
    fn test_unknown_status_is_reported() {
        let todo = make_todo(7, "A", "archived", "2024-03-10 09:00:00", "2024-03-10 09:00:00");
        match todo.status() {
            Err(AppError::UnknownStatus { id, status }) => {
                assert_eq!(id, 7);
                assert_eq!(status, "archived");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-10 08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-10T08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-10T08:30:00+08:00"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_create_input_trims_and_validates() {
        let input = CreateTodoInput::new("  Call back  ", TodoStatus::Pending, " Broker A ");
        let clean = input.validate().unwrap();
        assert_eq!(clean.title, "Call back");
        assert_eq!(clean.broker, "Broker A");

        let empty = CreateTodoInput::new("   ", TodoStatus::Pending, "A");
        assert!(matches!(empty.validate(), Err(AppError::Validation(_))));

        let long_broker = CreateTodoInput::new("t", TodoStatus::Pending, "b".repeat(101));
        assert!(matches!(long_broker.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_input_only_checks_present_fields() {
        let input = UpdateTodoInput { status: Some(TodoStatus::Completed), ..Default::default() };
        assert_eq!(input.validate().unwrap(), input);

        let bad = UpdateTodoInput { title: Some(String::new()), ..Default::default() };
        assert!(bad.validate().is_err());
    }
}
