//! The I/O seam: executing `HttpRequest`s, and the Data Client built on it.
//!
//! # Design
//! `Transport` is the only place a network round trip happens. `DataClient`
//! pairs it with the stateless `TaskClient` so each remote operation is
//! build, execute, parse. A transport must hand back non-2xx responses as
//! data; status interpretation stays in `TaskClient`.

use tracing::debug;

use crate::client::TaskClient;
use crate::error::{FailureReason, FetchError, Operation, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Color, CreateTask, Task, TaskId, Title, UpdateTask};

/// Executes one HTTP round trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport on a shared ureq agent.
///
/// Status-code-as-error is disabled so 4xx/5xx responses come back as data.
#[cfg(feature = "ureq")]
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "ureq")]
impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    fn call(
        &self,
        request: &HttpRequest,
    ) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        use crate::http::HttpMethod;

        let path = request.path.as_str();
        let body = request.body.as_deref();
        match request.method {
            HttpMethod::Get => with_headers(self.agent.get(path), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(path), &request.headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(path), &request.headers), body),
            HttpMethod::Put => send(with_headers(self.agent.put(path), &request.headers), body),
        }
    }
}

#[cfg(feature = "ureq")]
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ureq")]
fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

#[cfg(feature = "ureq")]
fn send(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

#[cfg(feature = "ureq")]
impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut response = self
            .call(request)
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// One round trip per call against the `/todos` resource. No retries.
#[derive(Debug, Clone)]
pub struct DataClient<T> {
    client: TaskClient,
    transport: T,
}

impl<T: Transport> DataClient<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list(&self) -> Result<Vec<Task>, FetchError> {
        let response = self.round_trip(Operation::List, &self.client.build_list_tasks())?;
        self.client.parse_list_tasks(response)
    }

    pub fn get(&self, id: &TaskId) -> Result<Task, FetchError> {
        let response = self.round_trip(Operation::Get, &self.client.build_get_task(id))?;
        self.client.parse_get_task(response)
    }

    pub fn create(&self, title: Title, color: Option<Color>) -> Result<Task, FetchError> {
        self.create_with(&CreateTask::new(title, color))
    }

    pub fn create_with(&self, input: &CreateTask) -> Result<Task, FetchError> {
        let request = self.client.build_create_task(input)?;
        let response = self.round_trip(Operation::Create, &request)?;
        self.client.parse_create_task(response)
    }

    pub fn update(&self, id: &TaskId, input: &UpdateTask) -> Result<Task, FetchError> {
        let request = self.client.build_update_task(id, input)?;
        let response = self.round_trip(Operation::Update, &request)?;
        self.client.parse_update_task(response)
    }

    pub fn toggle(&self, id: &TaskId, completed: bool) -> Result<Task, FetchError> {
        self.update(id, &UpdateTask::completed(completed))
    }

    pub fn delete(&self, id: &TaskId) -> Result<(), FetchError> {
        let response = self.round_trip(Operation::Delete, &self.client.build_delete_task(id))?;
        self.client.parse_delete_task(response)
    }

    fn round_trip(
        &self,
        operation: Operation,
        request: &HttpRequest,
    ) -> Result<HttpResponse, FetchError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self
            .transport
            .execute(request)
            .map_err(|e| FetchError::new(operation, FailureReason::Transport(e.0)))?;
        debug!(status = response.status, path = %request.path, "received response");
        Ok(response)
    }
}
