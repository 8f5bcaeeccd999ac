//! Composition root for the GigBoard API. Wires the stores, hasher, token
//! codec and mailer into the router, and owns process-level concerns:
//! telemetry setup and database bootstrap.

pub mod helpers;
pub mod service;
pub mod tracing;

pub use helpers::{configure_postgresql, get_postgres_pool};
pub use service::GigboardService;
pub use self::tracing::init_tracing;
