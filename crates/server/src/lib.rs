pub mod config;
pub mod error;
pub mod identity;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus OS API",
        version = "0.1.0",
        description = "Multi-tenant school backend: batched enrollment, bibliography ordering, anchored chat"
    ),
    paths(
        routes::health_check,
        routes::tenants::register_tenant,
        routes::tenants::list_tenants,
        routes::enrollments::batch_enroll,
        routes::enrollments::batch_enroll_students,
        routes::enrollments::withdraw_enrollment,
        routes::enrollments::complete_enrollment,
        routes::enrollments::list_batch_enrollments,
        routes::bibliography::reorder_chapter_bibliography,
        routes::bibliography::list_chapter_bibliography,
        routes::chat::start_session,
        routes::chat::post_message,
        routes::chat::complete_session,
        routes::chat::cancel_session,
        routes::chat::get_session,
        routes::chat::list_messages,
        routes::chat::list_student_sessions,
    ),
    components(schemas(
        routes::HealthResponse,
        routes::tenants::RegisterTenantRequest,
        routes::enrollments::BatchEnrollRequest,
        routes::enrollments::BatchEnrollStudentsRequest,
        routes::bibliography::ReorderRequest,
        routes::chat::SessionStartResponse,
        routes::chat::PostMessageRequest,
        routes::chat::MessageExchangeResponse,
        campus_core::Tenant,
        campus_core::Enrollment,
        campus_core::EnrollmentStatus,
        campus_core::EnrollmentKind,
        campus_core::EnrollmentSubject,
        campus_core::BatchOptions,
        campus_core::BatchReport<campus_core::EnrollmentSubject>,
        campus_core::BatchItemResult<campus_core::EnrollmentSubject>,
        campus_core::BibliographyItem,
        campus_core::BibliographyKind,
        campus_core::SequenceMove,
        campus_core::ChatSession,
        campus_core::ChatSessionStatus,
        campus_core::ChatSessionKind,
        campus_core::ChatMessage,
        campus_core::MessageAuthor,
        campus_core::ConversationMode,
        orchestrator::StartSessionRequest,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tenants", description = "Tenant registry administration"),
        (name = "enrollments", description = "Batched enrollment operations"),
        (name = "bibliography", description = "Chapter bibliography ordering"),
        (name = "chat", description = "Anchored chat workflows"),
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .route(
            "/api/tenants",
            post(routes::tenants::register_tenant).get(routes::tenants::list_tenants),
        )
        .route(
            "/api/enrollments/batch",
            post(routes::enrollments::batch_enroll),
        )
        .route(
            "/api/enrollments/batch-students",
            post(routes::enrollments::batch_enroll_students),
        )
        .route(
            "/api/enrollments/{id}/withdraw",
            post(routes::enrollments::withdraw_enrollment),
        )
        .route(
            "/api/enrollments/{id}/complete",
            post(routes::enrollments::complete_enrollment),
        )
        .route(
            "/api/enrollments/batches/{batch_id}",
            get(routes::enrollments::list_batch_enrollments),
        )
        .route(
            "/api/chapters/{id}/bibliography/reorder",
            put(routes::bibliography::reorder_chapter_bibliography),
        )
        .route(
            "/api/chapters/{id}/bibliography",
            get(routes::bibliography::list_chapter_bibliography),
        )
        .route("/api/chat/sessions", post(routes::chat::start_session))
        .route(
            "/api/chat/sessions/{id}/messages",
            post(routes::chat::post_message).get(routes::chat::list_messages),
        )
        .route(
            "/api/chat/sessions/{id}/complete",
            post(routes::chat::complete_session),
        )
        .route(
            "/api/chat/sessions/{id}/cancel",
            post(routes::chat::cancel_session),
        )
        .route("/api/chat/sessions/{id}", get(routes::chat::get_session))
        .route(
            "/api/students/{id}/chat-sessions",
            get(routes::chat::list_student_sessions),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
