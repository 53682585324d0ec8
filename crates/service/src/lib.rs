//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod listing;
pub mod db;
pub mod overview_service;
#[cfg(test)]
pub mod test_support;
