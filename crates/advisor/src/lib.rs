mod client;
mod error;
mod types;

pub use client::*;
pub use error::*;
pub use types::*;

use async_trait::async_trait;

/// The external advisory (AI) backend, seen through the narrow contract
/// the workflow engines rely on: one bounded call, no retries.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    async fn advise(&self, request: AdvisoryRequest) -> Result<AdvisoryReply, AdvisorError>;
}
