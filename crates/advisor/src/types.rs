use serde::{Deserialize, Serialize};

/// Which conversational workflow the advisory backend should run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryVariant {
    /// Opening message for a freshly anchored session.
    SessionOpening,
    /// The student is answering the pending anchor question.
    AnswerEvaluation,
    /// Quiz-specific conversation.
    Quiz,
    /// Open conversation about the anchor content.
    Open,
}

/// Everything the backend needs to ground its reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryContext {
    pub student_name: String,
    pub module_title: String,
    pub chapter_title: String,
    pub item_title: String,
    pub item_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_question: Option<String>,
    /// The student message being replied to; absent for session openings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryRequest {
    pub variant: AdvisoryVariant,
    pub context: AdvisoryContext,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoryReply {
    pub message: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdvisoryErrorBody {
    pub error: AdvisoryErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdvisoryErrorDetail {
    pub message: String,
}
