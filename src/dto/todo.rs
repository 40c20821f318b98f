use crate::domain;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Deserializes a key that must be present but may hold null. A missing key is left to
/// `#[serde(default)]` and becomes `None`; a null value becomes `Some(None)`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// DTO for creating a new todo via the API. `title`, `dueDate` and `details` must be present,
/// though `dueDate` and `details` may be null.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTodo {
    #[validate(required)]
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
    #[serde(rename = "dueDate", default, deserialize_with = "present_or_null")]
    #[validate(required)]
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-01")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[validate(required)]
    #[schema(value_type = Option<String>, example = "2%")]
    pub details: Option<Option<String>>,
    #[schema(example = false)]
    pub completed: Option<bool>,
}

impl From<NewTodo> for domain::todo::NewTodo {
    fn from(value: NewTodo) -> Self {
        domain::todo::NewTodo {
            title: value.title.unwrap_or_default(),
            due_date: value.due_date.flatten(),
            details: value.details.flatten(),
            completed: value.completed.unwrap_or(false),
        }
    }
}

/// DTO for a newly created todo
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct TodoItem {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub title: String,
    /// Due date formatted as YYYY-MM-DD, or null when the todo has none
    #[serde(rename = "dueDate")]
    #[schema(example = "2024-01-01")]
    pub due_date: Option<NaiveDate>,
    #[schema(example = "2%")]
    pub details: Option<String>,
    #[schema(example = false)]
    pub completed: bool,
}

impl From<domain::todo::TodoItem> for TodoItem {
    fn from(value: domain::todo::TodoItem) -> Self {
        TodoItem {
            id: value.id,
            title: value.title,
            due_date: value.due_date,
            details: value.details,
            completed: value.completed,
        }
    }
}

/// DTO for a todo row as returned by the list endpoint. The stored `due_date` column is
/// passed through as-is, and `dueDate` is only added when the todo has a due date.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct StoredTodo {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = "2024-01-01")]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(test, serde(default))]
    #[schema(example = "2024-01-01")]
    pub formatted_due_date: Option<String>,
    #[schema(example = "2%")]
    pub details: Option<String>,
    #[schema(example = false)]
    pub completed: bool,
}

impl From<domain::todo::TodoItem> for StoredTodo {
    fn from(value: domain::todo::TodoItem) -> Self {
        StoredTodo {
            id: value.id,
            title: value.title,
            formatted_due_date: value
                .due_date
                .map(|due_date| due_date.format("%Y-%m-%d").to_string()),
            due_date: value.due_date,
            details: value.details,
            completed: value.completed,
        }
    }
}

/// DTO for changing whether a todo is completed. A missing `completed` flag means false.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
#[serde(default)]
pub struct UpdateCompletion {
    #[schema(example = true)]
    pub completed: bool,
}

/// DTO echoing the completion state that was requested for a todo
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct CompletionStatus {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = true)]
    pub completed: bool,
}

impl From<domain::todo::CompletionChange> for CompletionStatus {
    fn from(value: domain::todo::CompletionChange) -> Self {
        CompletionStatus {
            id: value.id,
            completed: value.completed,
        }
    }
}
