//! Backend library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] owns the entities, ports
//! and services; [`inbound`] adapts HTTP requests onto the driving ports; and
//! [`outbound`] implements the driven ports over PostgreSQL, memory and
//! bcrypt.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
