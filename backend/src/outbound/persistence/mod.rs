//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel row structs and domain types and
//! hold no business rules. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; connections come from a `bb8`
//! pool through `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use tourbook::outbound::persistence::{DbPool, DieselTourRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), tourbook::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tourbook")).await?;
//! let tours = DieselTourRepository::new(pool);
//! # let _ = tours;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_page_content_repository;
mod diesel_tour_repository;
mod diesel_translation_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_page_content_repository::DieselPageContentRepository;
pub use diesel_tour_repository::DieselTourRepository;
pub use diesel_translation_repository::DieselTranslationRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
