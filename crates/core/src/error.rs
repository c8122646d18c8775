use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tenant not found: {0}")]
    TenantNotFound(Uuid),

    #[error("Operator requests must name a target tenant")]
    MissingTenant,

    #[error("Invalid {entity} transition from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn invalid_transition(
        entity: &'static str,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::InvalidTransition {
            entity,
            from: from.into(),
            to: to.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::new_v4();
        let error = CoreError::TenantNotFound(id);
        assert!(error.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_transition_display_names_entity() {
        let error = CoreError::invalid_transition("enrollment", "withdrawn", "withdrawn");
        assert!(error.to_string().contains("enrollment"));
    }
}
