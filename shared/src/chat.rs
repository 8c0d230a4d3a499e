use serde::de::IgnoredAny;

use crate::{
    client::{ClientTransport, HttpClient},
    error::ClientResult,
    Conversation, HeaderMap, MessageResponse, SendMessageRequest, UpdateTaskRequest,
};

pub const CONVERSATIONS_PATH: &str = "/api/conversations";

fn conversation_path(conversation_id: &str) -> String {
    format!("{CONVERSATIONS_PATH}/{conversation_id}")
}

fn tasks_path(conversation_id: &str) -> String {
    format!("{CONVERSATIONS_PATH}/{conversation_id}/tasks")
}

/// Conversation endpoints of the planner backend. Holds no state of its own.
#[derive(Debug)]
pub struct ChatService<'a, T> {
    http: &'a HttpClient<T>,
}

impl<'a, T> Clone for ChatService<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for ChatService<'a, T> {}

impl<'a, T> ChatService<'a, T>
where
    T: ClientTransport,
{
    pub fn new(http: &'a HttpClient<T>) -> Self {
        Self { http }
    }

    pub async fn send_message(
        &self,
        request: &SendMessageRequest,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<Conversation, T::Error> {
        self.http
            .post(CONVERSATIONS_PATH, Some(request), extra_headers)
            .await
    }

    /// Conversations in the order the backend returns them.
    pub async fn get_conversations(
        &self,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<Vec<Conversation>, T::Error> {
        self.http.get(CONVERSATIONS_PATH, extra_headers).await
    }

    pub async fn get_conversation(
        &self,
        conversation_id: &str,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<Conversation, T::Error> {
        self.http
            .get(&conversation_path(conversation_id), extra_headers)
            .await
    }

    /// Deletes every conversation of the current session. Unlike the other
    /// operations this one takes no extra headers.
    pub async fn clear_conversations(&self) -> ClientResult<(), T::Error> {
        let _: IgnoredAny = self.http.delete(CONVERSATIONS_PATH, None).await?;
        Ok(())
    }

    pub async fn update_task_status(
        &self,
        conversation_id: &str,
        time_block_index: usize,
        task_index: usize,
        completed: bool,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<MessageResponse, T::Error> {
        let update = UpdateTaskRequest {
            time_block_index,
            task_index,
            completed,
        };

        self.http
            .patch(&tasks_path(conversation_id), Some(&update), extra_headers)
            .await
    }
}
