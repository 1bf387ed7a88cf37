use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{NewTask, TaskChanges},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Answer for a task that does not exist or belongs to someone else.
pub const TASK_NOT_FOUND: &str = "Task not found";

/// Payload of `POST /tasks`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    pub fn into_new_task(self) -> Result<NewTask, AppError> {
        self.validate()?;
        let title = match self.title.filter(|t| !t.is_empty()) {
            Some(title) => title,
            None => return Err(AppError::Validation("Title is required".into())),
        };
        Ok(NewTask {
            title,
            description: self.description.filter(|d| !d.is_empty()),
            due_date: self.due_date,
        })
    }
}

/// Payload of `PUT /tasks/{id}`. Omitted (or null) fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Status must be 1 to 50 characters"))]
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl UpdateTaskRequest {
    pub fn into_changes(self) -> Result<TaskChanges, AppError> {
        self.validate()?;
        Ok(TaskChanges {
            title: self.title,
            description: self.description,
            status: self.status,
            due_date: self.due_date,
        })
    }
}

/// Lists the caller's tasks, newest first.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects (possibly empty).
/// - `401 Unauthorized`: missing or invalid token.
/// - `500 Internal Server Error`: store failure.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list_for_user(user.id()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller.
///
/// ## Request Body:
/// - `title` (required)
/// - `description` (optional)
/// - `dueDate` (optional, `YYYY-MM-DD`)
///
/// ## Responses:
/// - `201 Created`: the new `Task`, with status `"pending"`.
/// - `400 Bad Request`: `{"error": "Title is required"}` or another validation message.
/// - `401 Unauthorized`, `500 Internal Server Error`.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let new_task = task_data.into_inner().into_new_task()?;
    let task = state.tasks.create(user.id(), new_task).await?;
    log::debug!("user {} created task {}", user.id(), task.id);
    Ok(HttpResponse::Created().json(task))
}

/// Partially updates one of the caller's tasks.
///
/// The row is matched on both id and owner, so a task that belongs to
/// another user is indistinguishable from one that does not exist.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `400 Bad Request`: a provided field is invalid (e.g. an empty title).
/// - `404 Not Found`: `{"error": "Task not found"}`.
/// - `401 Unauthorized`, `500 Internal Server Error`.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let changes = task_data.into_inner().into_changes()?;
    let task_id = task_id.into_inner();

    match state.tasks.update(task_id, user.id(), changes).await? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound(TASK_NOT_FOUND.into())),
    }
}

/// Deletes one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: `{"success": true}`.
/// - `404 Not Found`: absent or not owned by the caller.
/// - `401 Unauthorized`, `500 Internal Server Error`.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    if !state.tasks.delete(task_id, user.id()).await? {
        return Err(AppError::NotFound(TASK_NOT_FOUND.into()));
    }

    log::debug!("user {} deleted task {}", user.id(), task_id);
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_requires_title() {
        let missing = CreateTaskRequest::default();
        assert_eq!(
            validation_message(missing.into_new_task().unwrap_err()),
            "Title is required"
        );

        let empty = CreateTaskRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            validation_message(empty.into_new_task().unwrap_err()),
            "Title is required"
        );
    }

    #[test]
    fn test_create_request_parsing() {
        let request: CreateTaskRequest = serde_json::from_value(json!({
            "title": "Buy milk",
            "description": "",
            "dueDate": "2024-05-01"
        }))
        .unwrap();

        let task = request.into_new_task().unwrap();
        assert_eq!(task.title, "Buy milk");
        assert!(task.description.is_none());
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_create_title_too_long() {
        let request = CreateTaskRequest {
            title: Some("a".repeat(201)),
            ..Default::default()
        };
        assert!(request.into_new_task().is_err());
    }

    #[test]
    fn test_update_request_validation() {
        let only_status: UpdateTaskRequest =
            serde_json::from_value(json!({ "status": "done" })).unwrap();
        let changes = only_status.into_changes().unwrap();
        assert_eq!(changes.status.as_deref(), Some("done"));
        assert!(changes.title.is_none());
        assert!(changes.description.is_none());
        assert!(changes.due_date.is_none());

        let empty_title = UpdateTaskRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(empty_title.into_changes().is_err());
    }
}
