//! What a list endpoint answers when the table is empty.

use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyListPolicy {
    /// An empty table lists as `[]`.
    #[default]
    ReturnEmpty,
    /// An empty table is reported as `NotFound`.
    NotFound,
}

impl EmptyListPolicy {
    pub fn from_flag(empty_list_not_found: bool) -> Self {
        if empty_list_not_found { Self::NotFound } else { Self::ReturnEmpty }
    }

    pub fn apply<T>(self, entity: &str, rows: Vec<T>) -> Result<Vec<T>, ServiceError> {
        match self {
            Self::NotFound if rows.is_empty() => Err(ServiceError::NotFound(format!("No {entity} found"))),
            _ => Ok(rows),
        }
    }
}
