use std::collections::HashSet;

use campus_core::{BibliographyItem, SequenceMove};
use chrono::Utc;
use db::TenantStorageHandle;
use tracing::debug;
use uuid::Uuid;

use crate::error::{OrchestratorError, Result};

/// Atomically re-sequence bibliography items within one chapter.
///
/// Two phases inside one transaction: every moved item first parks on
/// the negative of its target slot, which cannot collide with untouched
/// siblings (always positive) or other moves (targets are distinct);
/// the second phase then lands each item on its positive target, which
/// phase one has already vacated. Any failure rolls the whole
/// transaction back; no partial reorder is ever observable.
///
/// A subset of siblings may be moved; untouched siblings keep their
/// sequence, and a move into a slot an untouched sibling still occupies
/// is rejected by the uniqueness constraint.
pub async fn reorder_bibliography(
    handle: &TenantStorageHandle,
    chapter_id: Uuid,
    moves: &[SequenceMove],
) -> Result<Vec<BibliographyItem>> {
    validate_moves(moves)?;

    let repo = handle.bibliography();
    let mut tx = handle.begin().await?;

    let ids: Vec<Uuid> = moves.iter().map(|m| m.item_id).collect();
    let items = repo.fetch_live_many(&mut tx, &ids).await?;
    if items.len() != moves.len() {
        return Err(OrchestratorError::NotFound("bibliography item"));
    }
    if items.iter().any(|item| item.chapter_id != chapter_id) {
        return Err(OrchestratorError::CrossScopeReorder);
    }

    let now = Utc::now();

    // Phase A: vacate every target slot.
    for mv in moves {
        repo.set_sequence(&mut tx, mv.item_id, -mv.new_sequence, now)
            .await?;
    }

    // Phase B: land on the requested slots.
    for mv in moves {
        if let Err(err) = repo.set_sequence(&mut tx, mv.item_id, mv.new_sequence, now).await {
            if err.is_unique_violation() {
                return Err(OrchestratorError::Validation(
                    "target sequence collides with an untouched sibling".into(),
                ));
            }
            return Err(err.into());
        }
    }

    tx.commit().await.map_err(db::DbError::from)?;
    debug!(%chapter_id, moves = moves.len(), "reorder committed");

    Ok(repo.list_live_by_chapter(chapter_id).await?)
}

fn validate_moves(moves: &[SequenceMove]) -> Result<()> {
    if moves.is_empty() {
        return Err(OrchestratorError::Validation(
            "reorder request contains no moves".into(),
        ));
    }

    let mut items = HashSet::new();
    let mut targets = HashSet::new();
    for mv in moves {
        if !items.insert(mv.item_id) {
            return Err(OrchestratorError::Validation(format!(
                "item {} listed more than once",
                mv.item_id
            )));
        }
        if mv.new_sequence < 1 {
            return Err(OrchestratorError::Validation(format!(
                "sequence {} is not positive",
                mv.new_sequence
            )));
        }
        if !targets.insert(mv.new_sequence) {
            return Err(OrchestratorError::DuplicateSequence);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(item_id: Uuid, new_sequence: i64) -> SequenceMove {
        SequenceMove {
            item_id,
            new_sequence,
        }
    }

    #[test]
    fn test_empty_request_rejected() {
        let err = validate_moves(&[]).unwrap_err();
        assert!(matches!(err, OrchestratorError::Validation(_)));
    }

    #[test]
    fn test_duplicate_targets_rejected() {
        let moves = [mv(Uuid::new_v4(), 1), mv(Uuid::new_v4(), 1)];
        let err = validate_moves(&moves).unwrap_err();
        assert!(matches!(err, OrchestratorError::DuplicateSequence));
    }

    #[test]
    fn test_repeated_item_rejected() {
        let id = Uuid::new_v4();
        let moves = [mv(id, 1), mv(id, 2)];
        let err = validate_moves(&moves).unwrap_err();
        assert!(matches!(err, OrchestratorError::Validation(_)));
    }

    #[test]
    fn test_non_positive_target_rejected() {
        let moves = [mv(Uuid::new_v4(), 0)];
        assert!(validate_moves(&moves).is_err());

        let moves = [mv(Uuid::new_v4(), -3)];
        assert!(validate_moves(&moves).is_err());
    }

    #[test]
    fn test_single_move_is_valid() {
        let moves = [mv(Uuid::new_v4(), 7)];
        assert!(validate_moves(&moves).is_ok());
    }
}
