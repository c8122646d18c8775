use campus_core::{ChatMessage, ChatSession, ChatSessionKind, ChatSessionStatus, MessageAuthor};
use uuid::Uuid;

use super::{datetime_to_timestamp, timestamp_to_datetime};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatSessionRow {
    pub id: String,
    pub student_id: String,
    pub module_id: String,
    pub chapter_id: String,
    pub bibliography_item_id: String,
    pub kind: String,
    pub status: String,
    pub ai_question_asked: bool,
    pub ai_question_answered: bool,
    pub started_at: i64,
    pub ended_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl ChatSessionRow {
    pub fn into_domain(self) -> ChatSession {
        ChatSession {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            student_id: Uuid::parse_str(&self.student_id).unwrap_or_default(),
            module_id: Uuid::parse_str(&self.module_id).unwrap_or_default(),
            chapter_id: Uuid::parse_str(&self.chapter_id).unwrap_or_default(),
            bibliography_item_id: Uuid::parse_str(&self.bibliography_item_id).unwrap_or_default(),
            kind: ChatSessionKind::parse(&self.kind).unwrap_or_default(),
            status: ChatSessionStatus::parse(&self.status).unwrap_or_default(),
            ai_question_asked: self.ai_question_asked,
            ai_question_answered: self.ai_question_answered,
            started_at: timestamp_to_datetime(self.started_at),
            ended_at: self.ended_at.map(timestamp_to_datetime),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
            deleted_at: self.deleted_at.map(timestamp_to_datetime),
        }
    }
}

impl From<&ChatSession> for ChatSessionRow {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id.to_string(),
            student_id: session.student_id.to_string(),
            module_id: session.module_id.to_string(),
            chapter_id: session.chapter_id.to_string(),
            bibliography_item_id: session.bibliography_item_id.to_string(),
            kind: session.kind.as_str().to_string(),
            status: session.status.as_str().to_string(),
            ai_question_asked: session.ai_question_asked,
            ai_question_answered: session.ai_question_answered,
            started_at: datetime_to_timestamp(session.started_at),
            ended_at: session.ended_at.map(datetime_to_timestamp),
            created_at: datetime_to_timestamp(session.created_at),
            updated_at: datetime_to_timestamp(session.updated_at),
            deleted_at: session.deleted_at.map(datetime_to_timestamp),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatMessageRow {
    pub id: String,
    pub session_id: String,
    pub author: String,
    pub content: String,
    pub metadata: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl ChatMessageRow {
    pub fn into_domain(self) -> ChatMessage {
        ChatMessage {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            session_id: Uuid::parse_str(&self.session_id).unwrap_or_default(),
            author: MessageAuthor::parse(&self.author).unwrap_or(MessageAuthor::Student),
            content: self.content,
            metadata: self
                .metadata
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
            deleted_at: self.deleted_at.map(timestamp_to_datetime),
        }
    }
}

impl From<&ChatMessage> for ChatMessageRow {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.to_string(),
            session_id: message.session_id.to_string(),
            author: message.author.as_str().to_string(),
            content: message.content.clone(),
            metadata: message.metadata.as_ref().map(|value| value.to_string()),
            created_at: datetime_to_timestamp(message.created_at),
            updated_at: datetime_to_timestamp(message.updated_at),
            deleted_at: message.deleted_at.map(datetime_to_timestamp),
        }
    }
}
