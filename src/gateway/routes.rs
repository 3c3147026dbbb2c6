//! Client-facing route dispatch.

use mockable::Clock;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;

use super::http::{ApiRequest, ApiResponse};
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::{HandoffQueue, TaskStore},
    services::{IntakeError, IntakeService},
};

/// Request body accepted by `POST /tasks`.
#[derive(Debug, Deserialize)]
struct CreateTaskBody {
    #[serde(default)]
    description: String,
}

/// Client-facing gateway over the intake service.
///
/// Dispatches HTTP-shaped requests to intake operations and maps every
/// outcome, including failures, to a structured JSON response.
#[derive(Clone)]
pub struct Gateway<S, Q, C>
where
    S: TaskStore,
    Q: HandoffQueue,
    C: Clock + Send + Sync,
{
    intake: IntakeService<S, Q, C>,
}

impl<S, Q, C> Gateway<S, Q, C>
where
    S: TaskStore,
    Q: HandoffQueue,
    C: Clock + Send + Sync,
{
    /// Creates a gateway over an intake service.
    #[must_use]
    pub const fn new(intake: IntakeService<S, Q, C>) -> Self {
        Self { intake }
    }

    /// Routes one request.
    ///
    /// Supports `POST /tasks`, `GET /tasks`, `GET /tasks/{id}`, and CORS
    /// preflight via `OPTIONS`. Anything else is a structured 404.
    pub async fn dispatch(&self, request: &ApiRequest) -> ApiResponse {
        if request.method.eq_ignore_ascii_case("OPTIONS") {
            return ApiResponse::json(200, &json!({"ok": true}));
        }

        let is_post = request.method.eq_ignore_ascii_case("POST");
        let is_get = request.method.eq_ignore_ascii_case("GET");

        if is_post && request.path == "/tasks" {
            return self.create_task(request).await;
        }
        if is_get && request.path == "/tasks" {
            return self.list_tasks().await;
        }
        if is_get && request.path.starts_with("/tasks/") {
            let raw_id = request.path.rsplit('/').next().unwrap_or_default();
            return self.get_task(raw_id).await;
        }

        ApiResponse::json(
            404,
            &json!({
                "error": "Not found",
                "path": request.path,
                "method": request.method,
            }),
        )
    }

    async fn create_task(&self, request: &ApiRequest) -> ApiResponse {
        let raw_body = request.body.as_deref().unwrap_or("{}");
        let Ok(body) = serde_json::from_str::<CreateTaskBody>(raw_body) else {
            return ApiResponse::json(400, &json!({"error": "Request body must be JSON"}));
        };

        match self.intake.create_task(&body.description).await {
            Ok(receipt) => ApiResponse::json(
                202,
                &json!({
                    "id": receipt.id,
                    "status": receipt.status,
                    "message": receipt.message,
                }),
            ),
            Err(IntakeError::Domain(TaskDomainError::EmptyDescription)) => {
                ApiResponse::json(400, &json!({"error": "Description is required"}))
            }
            Err(err) => internal_error(&err),
        }
    }

    async fn list_tasks(&self) -> ApiResponse {
        match self.intake.list_tasks().await {
            Ok(tasks) => ApiResponse::json(200, &tasks),
            Err(err) => internal_error(&err),
        }
    }

    async fn get_task(&self, raw_id: &str) -> ApiResponse {
        let Ok(id) = TaskId::from_str(raw_id) else {
            return not_found_task(raw_id);
        };
        match self.intake.get_task(id).await {
            Ok(task) => ApiResponse::json(200, &task),
            Err(IntakeError::TaskNotFound(_)) => not_found_task(raw_id),
            Err(err) => internal_error(&err),
        }
    }
}

fn not_found_task(raw_id: &str) -> ApiResponse {
    ApiResponse::json(
        404,
        &json!({"error": "Task not found", "task_id": raw_id}),
    )
}

fn internal_error(err: &IntakeError) -> ApiResponse {
    tracing::error!(error = %err, "intake request failed");
    ApiResponse::json(
        500,
        &json!({"error": format!("Internal server error: {err}")}),
    )
}
