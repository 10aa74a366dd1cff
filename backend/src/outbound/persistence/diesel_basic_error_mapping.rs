//! Shared Diesel error mapping for the repositories.
//!
//! Each repository supplies constructors for its own `Connection` and `Query`
//! variants; constraint violations that carry domain meaning are pulled out
//! first with [`constraint_violation`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Integrity failure reported by PostgreSQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    /// A foreign key pointed at a missing row.
    ForeignKey { constraint: Option<String> },
    /// A unique index rejected a duplicate value.
    Unique { constraint: Option<String> },
}

/// Classify integrity failures that repositories translate into named
/// port errors.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let constraint = info.constraint_name().map(str::to_owned);
    match kind {
        DatabaseErrorKind::ForeignKeyViolation => Some(ConstraintViolation::ForeignKey { constraint }),
        DatabaseErrorKind::UniqueViolation => Some(ConstraintViolation::Unique { constraint }),
        _ => None,
    }
}

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel error variants into query/connection constructors.
///
/// Only a closed connection is treated as a connection failure; every other
/// database error is a query failure.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::RollbackTransaction | DieselError::RollbackErrorOnCommit { .. } => {
            query("transaction rolled back")
        }
        _ => query("database error"),
    }
}
