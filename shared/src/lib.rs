use serde::{Deserialize, Serialize};

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod files;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::ChatService;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use files::FileService;
pub use client::{
    ClientTransport, Credentials, FormPart, HttpClient, MultipartForm, RawResponse, RequestBody,
    RequestConfig,
};
pub use http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

/// Planning depth requested from the backend.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    Basic,
    Detailed,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PlanMode>,
}

impl SendMessageRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: PlanMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task: String,
    pub essential: bool,
    pub estimated_time: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub time_block: String,
    pub tasks: Vec<Task>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    pub project_overview: String,
    pub tech_stack: Vec<String>,
    pub timeline: Vec<TimeBlock>,
    pub tips: Vec<String>,
}

/// One exchange with the planner: the user's message, the generated reply and
/// the structured plan when the backend produced one.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub user_message: String,
    pub bot_response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_plan: Option<ProjectPlan>,
    pub timestamp: String,
}

/// Payload of `PATCH /api/conversations/{id}/tasks`. Tasks are addressed by
/// position inside the plan, so indices go stale if the plan is reordered.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub time_block_index: usize,
    pub task_index: usize,
    pub completed: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Pdf,
    Word,
    Other,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub id: String,
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub filename: String,
    pub size: u64,
}
