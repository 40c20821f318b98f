use crate::domain;
use crate::domain::todo::{NewTodo, TodoItem};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use chrono::NaiveDate;
use sqlx::{FromRow, query, query_as};

pub struct DbTodoReader;

#[derive(FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    due_date: Option<NaiveDate>,
    details: Option<String>,
    completed: Option<bool>,
}

impl From<TodoRow> for domain::todo::TodoItem {
    fn from(value: TodoRow) -> Self {
        TodoItem {
            id: value.id,
            title: value.title,
            due_date: value.due_date,
            details: value.details,
            completed: value.completed.unwrap_or(false),
        }
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn all_todos(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todos: Vec<TodoItem> = query_as::<_, TodoRow>(
            "SELECT t.id, t.title, t.due_date, t.details, t.completed FROM todos t",
        )
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch all todos")?
        .into_iter()
        .map(domain::todo::TodoItem::from)
        .collect();

        Ok(todos)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i64, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let new_id = query_as::<_, super::NewId>(
            "INSERT INTO todos(title, due_date, details, completed) VALUES ($1, $2, $3, $4) RETURNING todos.id",
        )
        .bind(&new_todo.title)
        .bind(new_todo.due_date)
        .bind(&new_todo.details)
        .bind(new_todo.completed)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo into the database")?;

        Ok(new_id.id)
    }

    async fn set_completion(
        &self,
        todo_id: i64,
        completed: bool,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("UPDATE todos SET completed = $1 WHERE id = $2")
            .bind(completed)
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to update a todo's completion in the database")?;

        Ok(())
    }

    async fn delete_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("DELETE FROM todos WHERE id = $1")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo from the database")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
    use crate::external_connections::test_util::FakeExternalConnectivity;
    use speculoos::prelude::*;

    #[tokio::test]
    async fn unreachable_database_fails_every_statement() {
        let mut ext_cxn = FakeExternalConnectivity::new();
        let new_todo = NewTodo {
            title: "Buy milk".to_owned(),
            due_date: None,
            details: None,
            completed: false,
        };

        assert_that!(DbTodoReader.all_todos(&mut ext_cxn).await).is_err();
        assert_that!(DbTodoWriter.create_todo(&new_todo, &mut ext_cxn).await).is_err();
        assert_that!(DbTodoWriter.set_completion(1, true, &mut ext_cxn).await).is_err();
        assert_that!(DbTodoWriter.delete_todo(1, &mut ext_cxn).await).is_err();
        assert_eq!(4, ext_cxn.connection_attempts);
    }
}
