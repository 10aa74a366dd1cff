//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Only PostgreSQL persistence is provided. Adapters convert between domain
//! types and storage rows and contain no business logic.

pub mod persistence;
