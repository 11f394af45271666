//! Domain DTOs for the `/todos` resource.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. `Task` is
//! the wire shape returned by the server, `TaskRecord` is the local shape the
//! view state keeps (colour already defaulted, timestamps dropped).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned task identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Colour tag palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Orange,
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Gray,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Orange,
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Pink,
        Color::Gray,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Gray => "gray",
        }
    }

    pub fn parse(value: &str) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Absent or unrecognised wire values fall back to the default colour.
    pub fn from_wire(value: Option<&str>) -> Color {
        value.and_then(Color::parse).unwrap_or_default()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("task title must not be empty")]
pub struct EmptyTitle;

/// A trimmed, non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Title, EmptyTitle> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyTitle);
        }
        Ok(Title(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = EmptyTitle;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Title::parse(&raw)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single task as returned by the server.
///
/// `color` stays a raw string here so an unknown palette entry never fails
/// decoding of the whole list; the local record maps it through
/// [`Color::from_wire`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a new task. The server assigns the id and
/// the remaining defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl CreateTask {
    pub fn new(title: Title, color: Option<Color>) -> Self {
        Self { title, color }
    }
}

/// Request payload for updating an existing task. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTask {
    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }

    pub fn title(title: Title) -> Self {
        Self {
            title: Some(title),
            completed: None,
        }
    }
}

/// Local mirror of a server-confirmed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub color: Color,
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let color = Color::from_wire(task.color.as_deref());
        Self {
            id: task.id,
            title: task.title,
            completed: task.completed,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        let title = Title::parse("  Buy milk \n").unwrap();
        assert_eq!(title.as_str(), "Buy milk");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(Title::parse(""), Err(EmptyTitle));
        assert_eq!(Title::parse("   \t"), Err(EmptyTitle));
    }

    #[test]
    fn title_deserialization_rejects_blank() {
        let result: Result<Title, _> = serde_json::from_str(r#""   ""#);
        assert!(result.is_err());
    }

    #[test]
    fn color_defaults_to_orange() {
        assert_eq!(Color::default(), Color::Orange);
        assert_eq!(Color::from_wire(None), Color::Orange);
        assert_eq!(Color::from_wire(Some("chartreuse")), Color::Orange);
        assert_eq!(Color::from_wire(Some("Blue")), Color::Blue);
    }

    #[test]
    fn color_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Color::Purple).unwrap(), "purple");
    }

    #[test]
    fn task_decodes_without_color_or_timestamps() {
        let task: Task =
            serde_json::from_str(r#"{"id":"a1","title":"Plain","completed":false}"#).unwrap();
        assert_eq!(task.id.as_str(), "a1");
        assert!(task.color.is_none());
        assert!(task.created_at.is_none());
    }

    #[test]
    fn task_decodes_timestamps() {
        let task: Task = serde_json::from_str(
            r#"{"id":"a1","title":"T","completed":true,"color":"red",
                "created_at":"2025-01-02T03:04:05Z","updated_at":"2025-01-02T03:04:06Z"}"#,
        )
        .unwrap();
        assert_eq!(task.created_at.unwrap().to_rfc3339(), "2025-01-02T03:04:05+00:00");
        assert!(task.updated_at > task.created_at);
    }

    #[test]
    fn record_applies_default_color() {
        let task = Task {
            id: TaskId::from("x"),
            title: "No colour".to_string(),
            completed: false,
            color: None,
            created_at: None,
            updated_at: None,
        };
        let record = TaskRecord::from(task);
        assert_eq!(record.color, Color::Orange);
    }

    #[test]
    fn create_task_omits_missing_color() {
        let input = CreateTask::new(Title::parse("Walk dog").unwrap(), None);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Walk dog"}));
    }

    #[test]
    fn update_task_carries_only_given_fields() {
        let json = serde_json::to_value(UpdateTask::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({"completed": true}));

        let json = serde_json::to_value(UpdateTask::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
