use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChatSessionStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl ChatSessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChatSessionKind {
    #[default]
    Bibliography,
    Quiz,
}

impl ChatSessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bibliography => "bibliography",
            Self::Quiz => "quiz",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bibliography" => Some(Self::Bibliography),
            "quiz" => Some(Self::Quiz),
            _ => None,
        }
    }
}

/// Which advisory workflow variant a student message routes through.
/// Selection priority is fixed: a pending question wins over quiz mode,
/// quiz mode wins over open conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversationMode {
    AnswerEvaluation,
    Quiz,
    Open,
}

impl ConversationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnswerEvaluation => "answer_evaluation",
            Self::Quiz => "quiz",
            Self::Open => "open",
        }
    }
}

/// A chat session anchored on one bibliography item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatSession {
    pub id: Uuid,
    pub student_id: Uuid,
    pub module_id: Uuid,
    pub chapter_id: Uuid,
    pub bibliography_item_id: Uuid,
    pub kind: ChatSessionKind,
    pub status: ChatSessionStatus,
    /// Set once at creation, iff the anchor item declares a question.
    pub ai_question_asked: bool,
    /// One-way flag, flipped by the first student message that arrives
    /// while a question is pending.
    pub ai_question_answered: bool,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ChatSession {
    pub fn new(
        student_id: Uuid,
        module_id: Uuid,
        chapter_id: Uuid,
        bibliography_item_id: Uuid,
        kind: ChatSessionKind,
        ai_question_asked: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student_id,
            module_id,
            chapter_id,
            bibliography_item_id,
            kind,
            status: ChatSessionStatus::default(),
            ai_question_asked,
            ai_question_answered: false,
            started_at: now,
            ended_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn conversation_mode(&self) -> ConversationMode {
        if self.ai_question_asked && !self.ai_question_answered {
            ConversationMode::AnswerEvaluation
        } else if self.kind == ChatSessionKind::Quiz {
            ConversationMode::Quiz
        } else {
            ConversationMode::Open
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ChatSessionStatus::Active
    }

    /// Record that the pending question has been answered. No-op when no
    /// question is pending; the flag never flips back.
    pub fn mark_question_answered(&mut self) {
        if self.ai_question_asked && !self.ai_question_answered {
            self.ai_question_answered = true;
            self.updated_at = Utc::now();
        }
    }

    pub fn complete(&mut self) -> Result<(), CoreError> {
        self.end_with(ChatSessionStatus::Completed)
    }

    pub fn cancel(&mut self) -> Result<(), CoreError> {
        self.end_with(ChatSessionStatus::Cancelled)
    }

    fn end_with(&mut self, to: ChatSessionStatus) -> Result<(), CoreError> {
        if self.status != ChatSessionStatus::Active {
            return Err(CoreError::invalid_transition(
                "chat session",
                self.status.as_str(),
                to.as_str(),
            ));
        }
        self.status = to;
        self.ended_at = Some(Utc::now());
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageAuthor {
    Student,
    Advisor,
}

impl MessageAuthor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Advisor => "advisor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "advisor" => Some(Self::Advisor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub author: MessageAuthor,
    pub content: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn new(session_id: Uuid, author: MessageAuthor, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            session_id,
            author,
            content: content.into(),
            metadata: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
