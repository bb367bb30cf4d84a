use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0} already exists")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Classify a write failure, re-mapping unique-key violations to
    /// `Conflict` so a pre-check that lost the race against the store's own
    /// constraint still surfaces as a conflict.
    pub fn from_write(what: &str, e: DbErr) -> Self {
        let msg = e.to_string();
        let lower = msg.to_lowercase();
        if lower.contains("duplicate key") || lower.contains("unique constraint") {
            Self::Conflict(what.to_string())
        } else {
            Self::Db(msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_unique_violation_is_conflict() {
        let e = DbErr::Custom(
            "duplicate key value violates unique constraint \"idx_department_name\"".into(),
        );
        assert!(matches!(
            ModelError::from_write("department", e),
            ModelError::Conflict(_)
        ));
    }

    #[test]
    fn sqlite_unique_violation_is_conflict() {
        let e = DbErr::Custom("UNIQUE constraint failed: employee.email".into());
        assert!(matches!(
            ModelError::from_write("employee", e),
            ModelError::Conflict(_)
        ));
    }

    #[test]
    fn other_errors_stay_db() {
        let e = DbErr::Custom("connection reset by peer".into());
        assert!(matches!(ModelError::from_write("x", e), ModelError::Db(_)));
    }
}
