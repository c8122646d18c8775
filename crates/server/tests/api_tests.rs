use std::sync::Arc;

use axum_test::TestServer;
use campus_core::{
    BibliographyItem, BibliographyKind, Chapter, Module, Student, Tenant,
};
use db::{create_pool, run_registry_migrations, TenantRegistry, TenantResolver, TenantStorageHandle};
use serde_json::{json, Value};
use server::state::AppState;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestContext {
    server: TestServer,
    resolver: Arc<TenantResolver>,
    tenant: Tenant,
    _temp_dir: TempDir,
    advisor: MockServer,
}

async fn setup_test_server() -> TestContext {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry_url = format!("sqlite:{}", temp_dir.path().join("registry.db").display());

    let registry_pool = create_pool(&registry_url)
        .await
        .expect("Failed to create registry pool");
    run_registry_migrations(&registry_pool)
        .await
        .expect("Failed to run registry migrations");

    let advisor_mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/advice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Welcome to the reading.",
            "metadata": {"source": "mock"}
        })))
        .mount(&advisor_mock)
        .await;

    let resolver = TenantResolver::new(TenantRegistry::new(registry_pool), temp_dir.path());
    let advisor_client =
        advisor::HttpAdvisoryClient::new(advisor_mock.uri(), "test-key".to_string())
            .expect("Failed to build advisor client");

    let state = AppState::new(resolver, Arc::new(advisor_client));
    let resolver = state.resolver.clone();

    let tenant = Tenant::new("Springfield High", "springfield-high");
    resolver
        .registry()
        .register(&tenant)
        .await
        .expect("Failed to register tenant");

    let app = server::create_router(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    TestContext {
        server,
        resolver,
        tenant,
        _temp_dir: temp_dir,
        advisor: advisor_mock,
    }
}

impl TestContext {
    async fn handle(&self) -> TenantStorageHandle {
        self.resolver
            .resolve(self.tenant.id)
            .await
            .expect("Failed to resolve tenant")
    }

    fn professor_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("x-caller-id", Uuid::new_v4().to_string()),
            ("x-role", "professor".to_string()),
            ("x-tenant-id", self.tenant.id.to_string()),
        ]
    }
}

async fn seed_student(handle: &TenantStorageHandle) -> Student {
    let student = Student::new("Lisa Simpson", "lisa@springfield.example");
    handle.students().create(&student).await.unwrap();
    student
}

async fn seed_module(handle: &TenantStorageHandle, published: bool) -> Module {
    let module = Module::new("Romantic Literature", published);
    handle.modules().create(&module).await.unwrap();
    module
}

async fn seed_chapter(handle: &TenantStorageHandle, module_id: Uuid) -> Chapter {
    let chapter = Chapter::new(module_id, "Odes");
    handle.chapters().create(&chapter).await.unwrap();
    chapter
}

async fn seed_item(
    handle: &TenantStorageHandle,
    chapter_id: Uuid,
    sequence: i64,
) -> BibliographyItem {
    let item = BibliographyItem::new(
        chapter_id,
        format!("Item {sequence}"),
        "content",
        BibliographyKind::Reading,
        sequence,
    );
    handle.bibliography().create(&item).await.unwrap();
    item
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let ctx = setup_test_server().await;

        let response = ctx.server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}

mod identity {
    use super::*;

    #[tokio::test]
    async fn test_missing_role_is_rejected() {
        let ctx = setup_test_server().await;

        let response = ctx
            .server
            .get(&format!("/api/enrollments/batches/{}", Uuid::new_v4()))
            .add_header("x-caller-id", Uuid::new_v4().to_string())
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_operator_without_target_tenant_is_rejected() {
        let ctx = setup_test_server().await;

        let response = ctx
            .server
            .get(&format!("/api/enrollments/batches/{}", Uuid::new_v4()))
            .add_header("x-caller-id", Uuid::new_v4().to_string())
            .add_header("x-role", "operator")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_unknown_tenant_is_not_found() {
        let ctx = setup_test_server().await;

        let response = ctx
            .server
            .get(&format!("/api/enrollments/batches/{}", Uuid::new_v4()))
            .add_header("x-caller-id", Uuid::new_v4().to_string())
            .add_header("x-role", "professor")
            .add_header("x-tenant-id", Uuid::new_v4().to_string())
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_operator_reaches_named_tenant() {
        let ctx = setup_test_server().await;

        let response = ctx
            .server
            .get(&format!("/api/enrollments/batches/{}", Uuid::new_v4()))
            .add_header("x-caller-id", Uuid::new_v4().to_string())
            .add_header("x-role", "operator")
            .add_header("x-target-tenant", ctx.tenant.id.to_string())
            .await;

        response.assert_status_ok();
    }
}

mod tenants {
    use super::*;

    #[tokio::test]
    async fn test_operator_registers_tenant() {
        let ctx = setup_test_server().await;

        let response = ctx
            .server
            .post("/api/tenants")
            .add_header("x-caller-id", Uuid::new_v4().to_string())
            .add_header("x-role", "operator")
            .json(&json!({
                "name": "Shelbyville High",
                "storage_identifier": "shelbyville-high"
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["name"], "Shelbyville High");
        assert_eq!(body["active"], true);
    }

    #[tokio::test]
    async fn test_professor_cannot_register_tenant() {
        let ctx = setup_test_server().await;

        let mut request = ctx.server.post("/api/tenants").json(&json!({
            "name": "Shelbyville High",
            "storage_identifier": "shelbyville-high"
        }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }

        request.await.assert_status(axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_duplicate_storage_identifier_conflicts() {
        let ctx = setup_test_server().await;

        let response = ctx
            .server
            .post("/api/tenants")
            .add_header("x-caller-id", Uuid::new_v4().to_string())
            .add_header("x-role", "operator")
            .json(&json!({
                "name": "Copy of Springfield",
                "storage_identifier": "springfield-high"
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CONFLICT);
    }
}

mod enrollments {
    use super::*;

    #[tokio::test]
    async fn test_batch_partial_failure_is_a_200() {
        let ctx = setup_test_server().await;
        let handle = ctx.handle().await;

        let student = seed_student(&handle).await;
        let published = seed_module(&handle, true).await;
        let unpublished = seed_module(&handle, false).await;

        let mut request = ctx.server.post("/api/enrollments/batch").json(&json!({
            "student_id": student.id,
            "module_ids": [published.id, unpublished.id]
        }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let response = request.await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total_requested"], 2);
        assert_eq!(body["successful"], 1);
        assert_eq!(body["failed"], 1);
        assert_eq!(body["skipped"], 0);
        assert_eq!(body["results"][1]["error"], "module not published");

        // Audit listing shows exactly the one created record.
        let batch_id = body["batch_id"].as_str().unwrap().to_string();
        let mut request = ctx
            .server
            .get(&format!("/api/enrollments/batches/{batch_id}"));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let audit: Value = request.await.json();
        assert_eq!(audit.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_400() {
        let ctx = setup_test_server().await;
        let handle = ctx.handle().await;
        let student = seed_student(&handle).await;

        let mut request = ctx.server.post("/api/enrollments/batch").json(&json!({
            "student_id": student.id,
            "module_ids": []
        }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }

        request.await.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_withdraw_then_rewithdraw_conflicts() {
        let ctx = setup_test_server().await;
        let handle = ctx.handle().await;

        let student = seed_student(&handle).await;
        let module = seed_module(&handle, true).await;

        let mut request = ctx.server.post("/api/enrollments/batch").json(&json!({
            "student_id": student.id,
            "module_ids": [module.id]
        }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let body: Value = request.await.json();
        let enrollment_id = body["results"][0]["record_id"].as_str().unwrap().to_string();

        let mut request = ctx
            .server
            .post(&format!("/api/enrollments/{enrollment_id}/withdraw"));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let response = request.await;
        response.assert_status_ok();
        let withdrawn: Value = response.json();
        assert_eq!(withdrawn["status"], "withdrawn");

        let mut request = ctx
            .server
            .post(&format!("/api/enrollments/{enrollment_id}/withdraw"));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        request.await.assert_status(axum::http::StatusCode::CONFLICT);
    }
}

mod bibliography {
    use super::*;

    #[tokio::test]
    async fn test_reorder_round_trip() {
        let ctx = setup_test_server().await;
        let handle = ctx.handle().await;

        let module = seed_module(&handle, true).await;
        let chapter = seed_chapter(&handle, module.id).await;
        let a = seed_item(&handle, chapter.id, 1).await;
        let b = seed_item(&handle, chapter.id, 2).await;
        let c = seed_item(&handle, chapter.id, 3).await;

        let mut request = ctx
            .server
            .put(&format!("/api/chapters/{}/bibliography/reorder", chapter.id))
            .json(&json!({
                "moves": [
                    {"item_id": a.id, "new_sequence": 3},
                    {"item_id": b.id, "new_sequence": 1},
                    {"item_id": c.id, "new_sequence": 2}
                ]
            }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let response = request.await;

        response.assert_status_ok();
        let body: Value = response.json();
        let order: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            order,
            vec![b.id.to_string(), c.id.to_string(), a.id.to_string()]
        );
    }

    #[tokio::test]
    async fn test_duplicate_sequence_is_a_400() {
        let ctx = setup_test_server().await;
        let handle = ctx.handle().await;

        let module = seed_module(&handle, true).await;
        let chapter = seed_chapter(&handle, module.id).await;
        let a = seed_item(&handle, chapter.id, 1).await;
        let b = seed_item(&handle, chapter.id, 2).await;

        let mut request = ctx
            .server
            .put(&format!("/api/chapters/{}/bibliography/reorder", chapter.id))
            .json(&json!({
                "moves": [
                    {"item_id": a.id, "new_sequence": 5},
                    {"item_id": b.id, "new_sequence": 5}
                ]
            }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        request.await.assert_status_bad_request();

        // Store unchanged.
        let mut request = ctx
            .server
            .get(&format!("/api/chapters/{}/bibliography", chapter.id));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let body: Value = request.await.json();
        assert_eq!(body[0]["sequence"], 1);
        assert_eq!(body[1]["sequence"], 2);
    }
}

mod chat {
    use super::*;

    async fn seed_anchor(ctx: &TestContext) -> (Student, Module, Chapter, BibliographyItem) {
        let handle = ctx.handle().await;
        let student = seed_student(&handle).await;
        let module = seed_module(&handle, true).await;
        let chapter = seed_chapter(&handle, module.id).await;
        let item = seed_item(&handle, chapter.id, 1).await;
        (student, module, chapter, item)
    }

    #[tokio::test]
    async fn test_start_session_creates_session_with_first_message() {
        let ctx = setup_test_server().await;
        let (student, module, chapter, item) = seed_anchor(&ctx).await;

        let mut request = ctx.server.post("/api/chat/sessions").json(&json!({
            "student_id": student.id,
            "module_id": module.id,
            "chapter_id": chapter.id,
            "bibliography_item_id": item.id
        }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let response = request.await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["session"]["status"], "active");
        assert_eq!(body["first_message"]["author"], "advisor");
        assert_eq!(body["first_message"]["content"], "Welcome to the reading.");
    }

    #[tokio::test]
    async fn test_advisor_outage_leaves_no_session_behind() {
        let ctx = setup_test_server().await;
        let (student, module, chapter, item) = seed_anchor(&ctx).await;

        ctx.advisor.reset().await;
        Mock::given(method("POST"))
            .and(path("/advice"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"message": "advisor down"}
            })))
            .mount(&ctx.advisor)
            .await;

        let mut request = ctx.server.post("/api/chat/sessions").json(&json!({
            "student_id": student.id,
            "module_id": module.id,
            "chapter_id": chapter.id,
            "bibliography_item_id": item.id
        }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        request.await.assert_status(axum::http::StatusCode::BAD_GATEWAY);

        let mut request = ctx
            .server
            .get(&format!("/api/students/{}/chat-sessions", student.id));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let sessions: Value = request.await.json();
        assert!(sessions.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_complete_twice_conflicts() {
        let ctx = setup_test_server().await;
        let (student, module, chapter, item) = seed_anchor(&ctx).await;

        let mut request = ctx.server.post("/api/chat/sessions").json(&json!({
            "student_id": student.id,
            "module_id": module.id,
            "chapter_id": chapter.id,
            "bibliography_item_id": item.id
        }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let body: Value = request.await.json();
        let session_id = body["session"]["id"].as_str().unwrap().to_string();

        let mut request = ctx
            .server
            .post(&format!("/api/chat/sessions/{session_id}/complete"));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        request.await.assert_status_ok();

        let mut request = ctx
            .server
            .post(&format!("/api/chat/sessions/{session_id}/complete"));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        request.await.assert_status(axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_message_exchange_round_trip() {
        let ctx = setup_test_server().await;
        let (student, module, chapter, item) = seed_anchor(&ctx).await;

        let mut request = ctx.server.post("/api/chat/sessions").json(&json!({
            "student_id": student.id,
            "module_id": module.id,
            "chapter_id": chapter.id,
            "bibliography_item_id": item.id
        }));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let body: Value = request.await.json();
        let session_id = body["session"]["id"].as_str().unwrap().to_string();

        let mut request = ctx
            .server
            .post(&format!("/api/chat/sessions/{session_id}/messages"))
            .json(&json!({"content": "What should I focus on?"}));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let response = request.await;
        response.assert_status_ok();
        let exchange: Value = response.json();
        assert_eq!(exchange["mode"], "open");
        assert_eq!(exchange["student_message"]["author"], "student");
        assert_eq!(exchange["advisor_message"]["author"], "advisor");

        let mut request = ctx
            .server
            .get(&format!("/api/chat/sessions/{session_id}/messages"));
        for (name, value) in ctx.professor_headers() {
            request = request.add_header(name, value);
        }
        let messages: Value = request.await.json();
        assert_eq!(messages.as_array().unwrap().len(), 3);
    }
}
