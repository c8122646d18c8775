use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::error::AdvisorError;
use crate::types::{AdvisoryErrorBody, AdvisoryReply, AdvisoryRequest};
use crate::AdvisoryService;

/// Bounded SLA for one advisory call. A timeout behaves like any other
/// failure: the enclosing workflow transaction aborts.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the advisory backend. One POST per call, no retries;
/// the caller's transaction semantics decide what a failure means.
#[derive(Clone)]
pub struct HttpAdvisoryClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpAdvisoryClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, AdvisorError> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, AdvisorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl AdvisoryService for HttpAdvisoryClient {
    async fn advise(&self, request: AdvisoryRequest) -> Result<AdvisoryReply, AdvisorError> {
        debug!(variant = ?request.variant, "requesting advisory reply");

        let response = self
            .client
            .post(format!("{}/advice", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(body) = serde_json::from_str::<AdvisoryErrorBody>(&error_text) {
                error!("advisory API error: {}", body.error.message);
                return Err(AdvisorError::Api {
                    message: body.error.message,
                    status_code: Some(status.as_u16()),
                });
            }

            return Err(AdvisorError::Api {
                message: error_text,
                status_code: Some(status.as_u16()),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AdvisoryContext, AdvisoryVariant};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(variant: AdvisoryVariant) -> AdvisoryRequest {
        AdvisoryRequest {
            variant,
            context: AdvisoryContext {
                student_name: "Lisa Simpson".into(),
                module_title: "Literature".into(),
                chapter_title: "Romantic Poetry".into(),
                item_title: "Ode on a Grecian Urn".into(),
                item_content: "Thou still unravish'd bride of quietness...".into(),
                anchor_question: Some("What does the urn symbolize?".into()),
                student_message: None,
            },
        }
    }

    #[tokio::test]
    async fn test_advise_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/advice"))
            .and(body_partial_json(json!({"variant": "session_opening"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Let's look at the urn together.",
                "metadata": {"tokens": 42}
            })))
            .mount(&server)
            .await;

        let client = HttpAdvisoryClient::new(server.uri(), "test-key".into()).unwrap();
        let reply = client
            .advise(request(AdvisoryVariant::SessionOpening))
            .await
            .unwrap();

        assert_eq!(reply.message, "Let's look at the urn together.");
        assert_eq!(reply.metadata.unwrap()["tokens"], 42);
    }

    #[tokio::test]
    async fn test_advise_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/advice"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"message": "model overloaded"}
            })))
            .mount(&server)
            .await;

        let client = HttpAdvisoryClient::new(server.uri(), "test-key".into()).unwrap();
        let err = client
            .advise(request(AdvisoryVariant::Open))
            .await
            .unwrap_err();

        match err {
            AdvisorError::Api {
                message,
                status_code,
            } => {
                assert_eq!(message, "model overloaded");
                assert_eq!(status_code, Some(500));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_advise_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/advice"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "too late"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpAdvisoryClient::with_timeout(
            server.uri(),
            "test-key".into(),
            Duration::from_millis(50),
        )
        .unwrap();

        let err = client
            .advise(request(AdvisoryVariant::Quiz))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
