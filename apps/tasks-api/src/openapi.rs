use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Tasks API",
        version = "0.1.0",
        description = "CRUD for tasks with a TO_DO -> IN_PROGRESS -> DONE lifecycle"
    )
)]
struct BaseDoc;

/// Service document: the base info plus the task domain paths.
///
/// The domain routes carry absolute paths, so their document is merged
/// rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        BaseDoc::openapi().merge_from(domain_tasks::ApiDoc::openapi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_routes_are_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in ["/v1/tasks", "/v1/tasks/{id}", "/v1/tasks/{id}/status"] {
            assert!(paths.contains(&expected), "{expected} missing from {paths:?}");
        }
        assert_eq!(doc.info.title, "Tasks API");
    }
}
