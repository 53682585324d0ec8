use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
            return ModelError::Conflict(msg);
        }
        let msg = e.to_string();
        // Drivers that do not classify errors still carry the backend message.
        if msg.contains("duplicate key value violates unique constraint")
            || msg.contains("UNIQUE constraint failed")
        {
            return ModelError::Conflict(msg);
        }
        ModelError::Db(msg)
    }
}

impl From<common::CoreError> for ModelError {
    fn from(e: common::CoreError) -> Self {
        ModelError::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn duplicate_key_message_maps_to_conflict() {
        let err = DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"idx_client_email_unique\"".into(),
        ));
        assert!(matches!(ModelError::from(err), ModelError::Conflict(_)));
    }

    #[test]
    fn other_errors_stay_db_errors() {
        let err = DbErr::Conn(RuntimeErr::Internal("connection refused".into()));
        assert!(matches!(ModelError::from(err), ModelError::Db(_)));
    }
}
