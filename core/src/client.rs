//! Stateless HTTP request builder and response parser for the `/todos` API.
//!
//! # Design
//! `TaskClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;

use crate::error::{FailureReason, FetchError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTask, Task, TaskId, UpdateTask};

/// Synchronous, stateless client for the `/todos` resource.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_task(&self, id: &TaskId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_task(&self, input: &CreateTask) -> Result<HttpRequest, FetchError> {
        let body = serde_json::to_string(input).map_err(|e| {
            FetchError::new(Operation::Create, FailureReason::Serialization(e.to_string()))
        })?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_task(
        &self,
        id: &TaskId,
        input: &UpdateTask,
    ) -> Result<HttpRequest, FetchError> {
        let body = serde_json::to_string(input).map_err(|e| {
            FetchError::new(Operation::Update, FailureReason::Serialization(e.to_string()))
        })?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_path(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// `update` with only the `completed` field.
    pub fn build_toggle_task(&self, id: &TaskId, completed: bool) -> Result<HttpRequest, FetchError> {
        self.build_update_task(id, &UpdateTask::completed(completed))
    }

    pub fn build_delete_task(&self, id: &TaskId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, FetchError> {
        parse_json(Operation::List, response)
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, FetchError> {
        parse_json(Operation::Get, response)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, FetchError> {
        parse_json(Operation::Create, response)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, FetchError> {
        parse_json(Operation::Update, response)
    }

    /// The body of a successful delete is ignored.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), FetchError> {
        check_status(Operation::Delete, &response)
    }

    fn item_path(&self, id: &TaskId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn check_status(operation: Operation, response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    Err(FetchError::new(
        operation,
        FailureReason::Status {
            status: response.status,
            body: response.body.clone(),
        },
    ))
}

fn parse_json<T: DeserializeOwned>(
    operation: Operation,
    response: HttpResponse,
) -> Result<T, FetchError> {
    check_status(operation, &response)?;
    serde_json::from_str(&response.body)
        .map_err(|e| FetchError::new(operation, FailureReason::Deserialization(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Title};

    fn client() -> TaskClient {
        TaskClient::new("http://localhost:8000")
    }

    fn id() -> TaskId {
        TaskId::from("t-1")
    }

    #[test]
    fn build_list_tasks_produces_correct_request() {
        let req = client().build_list_tasks();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_task_targets_item_path() {
        let req = client().build_get_task(&id());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/todos/t-1");
    }

    #[test]
    fn build_create_task_produces_correct_request() {
        let input = CreateTask::new(Title::parse("Buy milk").unwrap(), Some(Color::Green));
        let req = client().build_create_task(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["color"], "green");
        assert!(body.get("completed").is_none());
    }

    #[test]
    fn build_toggle_task_sends_only_completed() {
        let req = client().build_toggle_task(&id(), true).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8000/todos/t-1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"completed": true}));
    }

    #[test]
    fn build_update_task_omits_absent_fields() {
        let input = UpdateTask::title(Title::parse("Renamed").unwrap());
        let req = client().build_update_task(&id(), &input).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Renamed");
        assert!(body.get("completed").is_none());
    }

    #[test]
    fn build_delete_task_produces_correct_request() {
        let req = client().build_delete_task(&id());
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8000/todos/t-1");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_tasks_success() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":"a","title":"Test","completed":false,"color":"blue"}]"#,
        );
        let tasks = client().parse_list_tasks(response).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Test");
        assert_eq!(tasks[0].color.as_deref(), Some("blue"));
    }

    #[test]
    fn parse_create_task_accepts_200_and_201() {
        let body = r#"{"id":"n","title":"New","completed":false,"color":"orange"}"#;
        assert!(client().parse_create_task(HttpResponse::new(200, body)).is_ok());
        assert!(client().parse_create_task(HttpResponse::new(201, body)).is_ok());
    }

    #[test]
    fn parse_create_task_wrong_status() {
        let err = client()
            .parse_create_task(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert_eq!(err.operation, Operation::Create);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn parse_update_task_unknown_id_is_fetch_error() {
        let err = client()
            .parse_update_task(HttpResponse::new(404, ""))
            .unwrap_err();
        assert_eq!(err.operation, Operation::Update);
        assert_eq!(err.message(), "Failed to update task");
    }

    #[test]
    fn parse_delete_task_accepts_any_2xx() {
        assert!(client().parse_delete_task(HttpResponse::new(204, "")).is_ok());
        assert!(client().parse_delete_task(HttpResponse::new(200, "{}")).is_ok());
    }

    #[test]
    fn parse_delete_task_not_found() {
        let err = client()
            .parse_delete_task(HttpResponse::new(404, "not found"))
            .unwrap_err();
        assert_eq!(err.operation, Operation::Delete);
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TaskClient::new("http://localhost:8000/");
        let req = client.build_list_tasks();
        assert_eq!(req.path, "http://localhost:8000/todos");
    }

    #[test]
    fn parse_list_tasks_bad_json() {
        let err = client()
            .parse_list_tasks(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err.reason, FailureReason::Deserialization(_)));
    }
}
