//! Active-record persistence for departments, employees and reviews.
//!
//! Records validate their own fields, persist through a [`Session`] bound to
//! one SQLite connection, and are de-duplicated by primary key so every read
//! of the same row yields the same [`Record`] handle.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, open_store, DbError, DbResult, StoreTarget};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::department::Department;
pub use model::employee::Employee;
pub use model::review::Review;
pub use model::validation::{ValidationError, MAX_RATING, MIN_RATING};
pub use model::{EntityKind, RecordId};
pub use repo::entity::Entity;
pub use repo::identity_map::{IdentityMap, IdentityMaps};
pub use repo::record::Record;
pub use repo::session::Session;
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
