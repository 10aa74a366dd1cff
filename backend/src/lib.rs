//! Tour booking and bilingual page content backend.
//!
//! Layout follows a hexagonal split: [`domain`] holds the model, ports and
//! services; [`inbound`] adapts HTTP requests onto the driving ports;
//! [`outbound`] implements the driven ports with Diesel over PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
