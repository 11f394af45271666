//! Client core for the task list service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! `/todos` resource, and keeps a local view of the task list in sync with
//! what the server confirms. Network I/O sits behind the `Transport` trait;
//! the bundled `UreqTransport` (feature `ureq`) is one implementation.
//!
//! # Design
//! - `TaskClient` is stateless: `build_*` produces a request, `parse_*`
//!   consumes a response.
//! - `DataClient` pairs a `TaskClient` with a `Transport`: one round trip per
//!   operation, every failure a `FetchError`.
//! - `ViewState` is an explicit value owned by the host. Its `begin_*` /
//!   `finish_*` pairs never mutate before the server has answered.
//! - `Controller` runs begin, call, finish synchronously for simple hosts.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod state;
pub mod transport;
pub mod types;

pub use client::TaskClient;
pub use config::ClientConfig;
pub use controller::Controller;
pub use error::{FailureReason, FetchError, Operation, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{DeleteStage, Phase, Summary, ViewState};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::{DataClient, Transport};
pub use types::{Color, CreateTask, EmptyTitle, Task, TaskId, TaskRecord, Title, UpdateTask};
