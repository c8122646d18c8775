use std::sync::Arc;

use advisor::{AdvisoryContext, AdvisoryRequest, AdvisoryService, AdvisoryVariant};
use campus_core::{
    BibliographyKind, ChatMessage, ChatSession, ChatSessionKind, ConversationMode, MessageAuthor,
};
use db::TenantStorageHandle;
use events::{Notification, NotificationBus, NotificationEnvelope};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{OrchestratorError, Result};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StartSessionRequest {
    pub student_id: Uuid,
    pub module_id: Uuid,
    pub chapter_id: Uuid,
    pub bibliography_item_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct SessionStart {
    pub session: ChatSession,
    pub first_message: ChatMessage,
}

#[derive(Debug, Clone)]
pub struct MessageExchange {
    pub mode: ConversationMode,
    pub student_message: ChatMessage,
    pub advisor_message: ChatMessage,
}

/// Fixed multi-step chat workflows, each atomic end-to-end.
///
/// A session and its first message are born in one transaction that
/// also spans the advisory call: if the advisor fails or times out,
/// nothing is left behind. A session is never visible without at least
/// one message establishing it.
pub struct ChatWorkflowEngine {
    advisor: Arc<dyn AdvisoryService>,
    bus: NotificationBus,
}

impl ChatWorkflowEngine {
    pub fn new(advisor: Arc<dyn AdvisoryService>, bus: NotificationBus) -> Self {
        Self { advisor, bus }
    }

    /// validate → write session → advisory call → write first message,
    /// all inside one transaction.
    pub async fn start_session(
        &self,
        handle: &TenantStorageHandle,
        request: StartSessionRequest,
    ) -> Result<SessionStart> {
        let student = handle
            .students()
            .find_live(request.student_id)
            .await?
            .ok_or(OrchestratorError::NotFound("student"))?;
        let module = handle
            .modules()
            .find_live(request.module_id)
            .await?
            .ok_or(OrchestratorError::NotFound("module"))?;
        let chapter = handle
            .chapters()
            .find_live(request.chapter_id)
            .await?
            .ok_or(OrchestratorError::NotFound("chapter"))?;
        let item = handle
            .bibliography()
            .find_live(request.bibliography_item_id)
            .await?
            .ok_or(OrchestratorError::NotFound("bibliography item"))?;

        if chapter.module_id != module.id {
            return Err(OrchestratorError::Validation(
                "chapter does not belong to module".into(),
            ));
        }
        if item.chapter_id != chapter.id {
            return Err(OrchestratorError::Validation(
                "bibliography item does not belong to chapter".into(),
            ));
        }

        let kind = match item.kind {
            BibliographyKind::Quiz => ChatSessionKind::Quiz,
            BibliographyKind::Reading => ChatSessionKind::Bibliography,
        };
        let session = ChatSession::new(
            student.id,
            module.id,
            chapter.id,
            item.id,
            kind,
            item.declares_question(),
        );

        let mut tx = handle.begin().await?;
        handle.chat_sessions().insert_in_tx(&mut tx, &session).await?;

        // The advisory call itself is not transactional, but what gets
        // persisted from it is decided before this transaction closes.
        let reply = self
            .advisor
            .advise(AdvisoryRequest {
                variant: AdvisoryVariant::SessionOpening,
                context: AdvisoryContext {
                    student_name: student.display_name.clone(),
                    module_title: module.title.clone(),
                    chapter_title: chapter.title.clone(),
                    item_title: item.title.clone(),
                    item_content: item.content.clone(),
                    anchor_question: item.anchor_question.clone(),
                    student_message: None,
                },
            })
            .await?;

        let mut first_message = ChatMessage::new(session.id, MessageAuthor::Advisor, reply.message);
        if let Some(metadata) = reply.metadata {
            first_message = first_message.with_metadata(metadata);
        }
        handle
            .chat_messages()
            .insert_in_tx(&mut tx, &first_message)
            .await?;

        tx.commit().await.map_err(db::DbError::from)?;

        let sent = self.bus.publish(NotificationEnvelope::new(
            handle.context().tenant_id,
            Notification::ChatSessionStarted {
                session_id: session.id,
                student_id: session.student_id,
                bibliography_item_id: session.bibliography_item_id,
            },
        ));
        if sent == 0 {
            debug!(%session.id, "session-start notification dropped");
        }

        Ok(SessionStart {
            session,
            first_message,
        })
    }

    /// Record a student message and the advisor's reply in one
    /// transaction. The conversation mode is decided before the write:
    /// a pending anchor question routes the message through answer
    /// evaluation and flips the one-way answered flag, after which quiz
    /// sessions route through the quiz variant and everything else is
    /// open conversation.
    pub async fn post_student_message(
        &self,
        handle: &TenantStorageHandle,
        session_id: Uuid,
        content: String,
    ) -> Result<MessageExchange> {
        let sessions = handle.chat_sessions();
        let mut session = sessions
            .find_by_id(session_id)
            .await?
            .ok_or(OrchestratorError::NotFound("chat session"))?;
        if !session.is_active() {
            return Err(OrchestratorError::InvalidState(format!(
                "chat session is {}",
                session.status.as_str()
            )));
        }

        let mode = session.conversation_mode();

        let student = handle
            .students()
            .find_live(session.student_id)
            .await?
            .ok_or(OrchestratorError::NotFound("student"))?;
        let module = handle
            .modules()
            .find_live(session.module_id)
            .await?
            .ok_or(OrchestratorError::NotFound("module"))?;
        let chapter = handle
            .chapters()
            .find_live(session.chapter_id)
            .await?
            .ok_or(OrchestratorError::NotFound("chapter"))?;
        let item = handle
            .bibliography()
            .find_live(session.bibliography_item_id)
            .await?
            .ok_or(OrchestratorError::NotFound("bibliography item"))?;

        let mut tx = handle.begin().await?;

        let student_message =
            ChatMessage::new(session.id, MessageAuthor::Student, content.clone());
        handle
            .chat_messages()
            .insert_in_tx(&mut tx, &student_message)
            .await?;

        if mode == ConversationMode::AnswerEvaluation {
            session.mark_question_answered();
            sessions
                .set_question_answered_in_tx(&mut tx, session.id, session.updated_at)
                .await?;
        }

        let reply = self
            .advisor
            .advise(AdvisoryRequest {
                variant: advisory_variant(mode),
                context: AdvisoryContext {
                    student_name: student.display_name,
                    module_title: module.title,
                    chapter_title: chapter.title,
                    item_title: item.title,
                    item_content: item.content,
                    anchor_question: item.anchor_question,
                    student_message: Some(content),
                },
            })
            .await?;

        let mut advisor_message = ChatMessage::new(session.id, MessageAuthor::Advisor, reply.message);
        if let Some(metadata) = reply.metadata {
            advisor_message = advisor_message.with_metadata(metadata);
        }
        handle
            .chat_messages()
            .insert_in_tx(&mut tx, &advisor_message)
            .await?;

        tx.commit().await.map_err(db::DbError::from)?;

        Ok(MessageExchange {
            mode,
            student_message,
            advisor_message,
        })
    }

    /// ACTIVE → COMPLETED. Terminal states reject and keep their
    /// original `ended_at`.
    pub async fn complete_session(
        &self,
        handle: &TenantStorageHandle,
        session_id: Uuid,
    ) -> Result<ChatSession> {
        self.end_session(handle, session_id, ChatSession::complete)
            .await
    }

    /// ACTIVE → CANCELLED.
    pub async fn cancel_session(
        &self,
        handle: &TenantStorageHandle,
        session_id: Uuid,
    ) -> Result<ChatSession> {
        self.end_session(handle, session_id, ChatSession::cancel)
            .await
    }

    async fn end_session(
        &self,
        handle: &TenantStorageHandle,
        session_id: Uuid,
        transition: fn(&mut ChatSession) -> std::result::Result<(), campus_core::CoreError>,
    ) -> Result<ChatSession> {
        let sessions = handle.chat_sessions();
        let mut session = sessions
            .find_by_id(session_id)
            .await?
            .ok_or(OrchestratorError::NotFound("chat session"))?;

        transition(&mut session)?;
        sessions.update_status(&session).await?;

        let sent = self.bus.publish(NotificationEnvelope::new(
            handle.context().tenant_id,
            Notification::ChatSessionEnded {
                session_id: session.id,
                status: session.status.as_str().to_string(),
            },
        ));
        if sent == 0 {
            debug!(%session.id, "session-end notification dropped");
        }

        Ok(session)
    }
}

fn advisory_variant(mode: ConversationMode) -> AdvisoryVariant {
    match mode {
        ConversationMode::AnswerEvaluation => AdvisoryVariant::AnswerEvaluation,
        ConversationMode::Quiz => AdvisoryVariant::Quiz,
        ConversationMode::Open => AdvisoryVariant::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_mapping_follows_mode() {
        assert_eq!(
            advisory_variant(ConversationMode::AnswerEvaluation),
            AdvisoryVariant::AnswerEvaluation
        );
        assert_eq!(advisory_variant(ConversationMode::Quiz), AdvisoryVariant::Quiz);
        assert_eq!(advisory_variant(ConversationMode::Open), AdvisoryVariant::Open);
    }
}
