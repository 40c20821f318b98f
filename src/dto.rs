use utoipa::OpenApi;

mod todo;

pub use todo::*;

use crate::routing_utils::{BasicErrorResponse, ExtraInfo, ValidationErrorSchema};

#[derive(OpenApi)]
#[openapi(components(schemas(
    TodoItem,
    StoredTodo,
    NewTodo,
    UpdateCompletion,
    CompletionStatus,
    BasicErrorResponse,
    ExtraInfo,
    ValidationErrorSchema,
)))]
/// Captures OpenAPI schemas and canned responses defined in the DTO module
pub struct OpenApiSchemas;
