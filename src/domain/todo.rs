use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::external_connections::ExternalConnectivity;
use anyhow::{Context, Error};
use chrono::NaiveDate;
use derive_more::Display;

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub details: Option<String>,
    pub completed: bool,
}

#[derive(PartialEq, Eq, Debug, Display)]
#[cfg_attr(test, derive(Clone))]
#[display("{title}")]
pub struct NewTodo {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub details: Option<String>,
    pub completed: bool,
}

impl TodoItem {
    /// Builds the stored representation of a new todo once storage has assigned it an ID
    pub fn from_new(id: i64, new_todo: &NewTodo) -> TodoItem {
        TodoItem {
            id,
            title: new_todo.title.clone(),
            due_date: new_todo.due_date,
            details: new_todo.details.clone(),
            completed: new_todo.completed,
        }
    }
}

/// The result of setting a todo's completion flag. Reported whether or not the todo exists.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct CompletionChange {
    pub id: i64,
    pub completed: bool,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait TodoReader {
        async fn all_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
    }

    pub trait TodoWriter {
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i64, anyhow::Error>;

        async fn set_completion(
            &self,
            todo_id: i64,
            completed: bool,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        async fn delete_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait TodoPort {
        async fn list_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, anyhow::Error>;
        async fn set_completion(
            &self,
            todo_id: i64,
            completed: bool,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<CompletionChange, anyhow::Error>;
        async fn delete_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<(), anyhow::Error>;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn list_todos(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<TodoItem>, Error> {
        let todos = todo_read
            .all_todos(&mut *ext_cxn)
            .await
            .context("listing todos")?;

        Ok(todos)
    }

    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, Error> {
        let new_id = todo_write
            .create_todo(new_todo, &mut *ext_cxn)
            .await
            .context("creating a todo")?;

        Ok(TodoItem::from_new(new_id, new_todo))
    }

    // Unknown IDs are not an error here, the update is simply a no-op
    async fn set_completion(
        &self,
        todo_id: i64,
        completed: bool,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<CompletionChange, Error> {
        todo_write
            .set_completion(todo_id, completed, &mut *ext_cxn)
            .await
            .context("updating a todo's completion")?;

        Ok(CompletionChange {
            id: todo_id,
            completed,
        })
    }

    async fn delete_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<(), Error> {
        todo_write
            .delete_todo(todo_id, &mut *ext_cxn)
            .await
            .context("deleting a todo")?;
        Ok(())
    }
}
