use crate::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Rust Todo API",
    description = "CRUD API over a single list of todo items"
))]
struct TodoServiceApi;

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
/// Merges in OpenAPI definitions from the [dto] package and [todo][super::todo] routes
pub fn build_documentation() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi_document())
}

/// The complete OpenAPI document for the service
pub fn openapi_document() -> utoipa::openapi::OpenApi {
    let mut api_docs = TodoServiceApi::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::todo::TodoApi::openapi());

    api_docs
}
