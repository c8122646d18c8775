use std::future::Future;

use campus_core::{BatchItemResult, BatchReport};
use tracing::warn;
use uuid::Uuid;

use crate::error::{OrchestratorError, Result};

/// What one sub-operation did with its item.
#[derive(Debug, Clone)]
pub enum ItemVerdict {
    /// A record was written and stamped with the batch id.
    Created { record_id: Uuid },
    /// The target relationship already existed; nothing was written.
    Duplicate { record_id: Option<Uuid> },
    /// A precondition failed; nothing was written.
    Rejected { reason: String },
}

/// Run an ordered list of independent sub-operations.
///
/// Each item commits on its own: a failure in item *i* never prevents
/// item *i+1* from executing and never rolls back earlier items. An
/// `Err` out of `op` is captured as that item's failure result; the
/// batch itself only fails on whole-batch preconditions (an empty item
/// list; tenant resolution happens before the engine runs).
///
/// The returned report preserves input order and its counts always sum
/// to the number of items.
pub async fn run_batch<I, K, SubF, OpF, Fut>(
    batch_id: Uuid,
    items: Vec<I>,
    subject: SubF,
    mut op: OpF,
) -> Result<BatchReport<K>>
where
    SubF: Fn(&I) -> K,
    OpF: FnMut(I) -> Fut,
    Fut: Future<Output = Result<ItemVerdict>>,
{
    if items.is_empty() {
        return Err(OrchestratorError::EmptyBatch);
    }

    let mut report = BatchReport::new(batch_id);
    for item in items {
        let key = subject(&item);
        let result = match op(item).await {
            Ok(ItemVerdict::Created { record_id }) => BatchItemResult::created(key, record_id),
            Ok(ItemVerdict::Duplicate { record_id }) => BatchItemResult::duplicate(key, record_id),
            Ok(ItemVerdict::Rejected { reason }) => BatchItemResult::failed(key, reason),
            Err(err) => {
                warn!(%batch_id, error = %err, "batch item failed unexpectedly");
                BatchItemResult::failed(key, err.to_string())
            }
        };
        report.push(result);
    }

    Ok(report)
}
