use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Caller-supplied knobs for a batch run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
pub struct BatchOptions {
    /// Dispatch a notification per successful item, best-effort.
    #[serde(default)]
    pub notify: bool,
}

/// Outcome of one sub-operation. Produced once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchItemResult<S> {
    pub subject: S,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub was_duplicate: bool,
    /// Id of the created (or pre-existing, for duplicates) record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<Uuid>,
}

impl<S> BatchItemResult<S> {
    pub fn created(subject: S, record_id: Uuid) -> Self {
        Self {
            subject,
            success: true,
            error: None,
            was_duplicate: false,
            record_id: Some(record_id),
        }
    }

    pub fn duplicate(subject: S, record_id: Option<Uuid>) -> Self {
        Self {
            subject,
            success: true,
            error: None,
            was_duplicate: true,
            record_id,
        }
    }

    pub fn failed(subject: S, error: impl Into<String>) -> Self {
        Self {
            subject,
            success: false,
            error: Some(error.into()),
            was_duplicate: false,
            record_id: None,
        }
    }
}

/// Aggregate view of one batch run. `results` preserves input order and
/// `successful + failed + skipped == total_requested` always holds.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchReport<S> {
    pub batch_id: Uuid,
    pub total_requested: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<BatchItemResult<S>>,
}

impl<S> BatchReport<S> {
    pub fn new(batch_id: Uuid) -> Self {
        Self {
            batch_id,
            total_requested: 0,
            successful: 0,
            failed: 0,
            skipped: 0,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: BatchItemResult<S>) {
        self.total_requested += 1;
        if result.was_duplicate {
            self.skipped += 1;
        } else if result.success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    /// Fold another report for the same batch into this one. Counts sum
    /// and results concatenate in call order.
    pub fn absorb(&mut self, other: BatchReport<S>) {
        self.total_requested += other.total_requested;
        self.successful += other.successful;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.results.extend(other.results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_total() {
        let mut report = BatchReport::new(Uuid::new_v4());
        report.push(BatchItemResult::created("a", Uuid::new_v4()));
        report.push(BatchItemResult::duplicate("b", None));
        report.push(BatchItemResult::failed("c", "module not published"));

        assert_eq!(report.total_requested, 3);
        assert_eq!(report.successful, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(
            report.successful + report.failed + report.skipped,
            report.total_requested
        );
    }

    #[test]
    fn test_absorb_sums_counts_and_preserves_order() {
        let batch_id = Uuid::new_v4();
        let mut first = BatchReport::new(batch_id);
        first.push(BatchItemResult::created("a", Uuid::new_v4()));

        let mut second = BatchReport::new(batch_id);
        second.push(BatchItemResult::failed("b", "student not found"));
        second.push(BatchItemResult::duplicate("c", None));

        first.absorb(second);
        assert_eq!(first.total_requested, 3);
        assert_eq!(first.successful, 1);
        assert_eq!(first.failed, 1);
        assert_eq!(first.skipped, 1);
        assert_eq!(first.results[0].subject, "a");
        assert_eq!(first.results[2].subject, "c");
    }

    #[test]
    fn test_duplicate_counts_as_success() {
        let result: BatchItemResult<&str> = BatchItemResult::duplicate("a", None);
        assert!(result.success);
        assert!(result.was_duplicate);
        assert!(result.error.is_none());
    }
}
