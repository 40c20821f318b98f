use crate::domain::todo::driving_ports::TodoPort;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{GenericErrorResponse, Json, ValidationErrorResponse};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{get, put};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(list_todos, create_todo, update_completion, delete_todo))]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Builds a router for all the routes under "/todos"
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            get(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                list_todos(&mut ext_cxn, &todo_service).await
            })
            .post(
                |State(app_state): AppState, Json(new_todo): Json<dto::NewTodo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    create_todo(new_todo, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/:todo_id",
            put(
                |State(app_state): AppState,
                 Path(todo_id): Path<i64>,
                 Json(update): Json<dto::UpdateCompletion>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    update_completion(todo_id, update, &mut ext_cxn, &todo_service).await
                },
            )
            .delete(
                |State(app_state): AppState, Path(todo_id): Path<i64>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "Every stored todo", body = Vec<dto::StoredTodo>),
        (status = 500, description = "The database could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Retrieves every todo in the system
async fn list_todos(
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<Vec<dto::StoredTodo>>, ErrorResponse> {
    info!("Listing todos");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;

    let todos = todo_service
        .list_todos(&mut *ext_cxn, &todo_reader)
        .await
        .map_err(|err| {
            error!("Could not list todos: {err:#}");
            GenericErrorResponse(err)
        })?;

    Ok(Json(todos.into_iter().map(dto::StoredTodo::from).collect()))
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body = dto::NewTodo,
    responses(
        (status = 201, description = "Todo created", body = dto::TodoItem),
        (status = 400, description = "A required field was missing or the body was not valid JSON", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The database could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Creates a todo, echoing back what was stored along with its new ID
async fn create_todo(
    new_todo: dto::NewTodo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<(StatusCode, Json<dto::TodoItem>), ErrorResponse> {
    new_todo.validate().map_err(ValidationErrorResponse::from)?;

    let domain_todo = domain::todo::NewTodo::from(new_todo);
    info!("Creating todo: {domain_todo}");
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let created = todo_service
        .create_todo(&domain_todo, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(|err| {
            error!("Todo create failure: {err:#}");
            GenericErrorResponse(err)
        })?;

    Ok((StatusCode::CREATED, Json(dto::TodoItem::from(created))))
}

#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i64, Path, description = "ID of the todo to update")),
    request_body = dto::UpdateCompletion,
    responses(
        (status = 200, description = "Completion updated, reported even if no todo has the ID", body = dto::CompletionStatus),
        (status = 400, description = "The body was not valid JSON", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The database could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Marks a todo as completed or not completed
async fn update_completion(
    todo_id: i64,
    update: dto::UpdateCompletion,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::CompletionStatus>, ErrorResponse> {
    info!("Setting completion of todo {todo_id} to {}", update.completed);
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let change = todo_service
        .set_completion(todo_id, update.completed, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(|err| {
            error!("Update todo failure: {err:#}");
            GenericErrorResponse(err)
        })?;

    Ok(Json(dto::CompletionStatus::from(change)))
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i64, Path, description = "ID of the todo to delete")),
    responses(
        (status = 204, description = "Todo deleted, or there was no todo with the ID"),
        (status = 500, description = "The database could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Deletes a todo
async fn delete_todo(
    todo_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<StatusCode, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    todo_service
        .delete_todo(todo_id, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(|err| {
            error!("Failed to delete todo: {err:#}");
            GenericErrorResponse(err)
        })?;

    Ok(StatusCode::NO_CONTENT)
}
