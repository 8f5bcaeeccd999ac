//! Axum HTTP surface for the GigBoard API.
//!
//! Handlers are generic over the ports defined in `gigboard_core`, so the
//! same routes run against Postgres in production and the in-memory stores
//! in the API tests. Each handler builds its use case per request from the
//! route's state tuple. The one exception is the session extractor in
//! [`extract`], which type-erases its dependencies behind [`SessionGate`]
//! because an extractor cannot be generic over the router's state.

pub mod error;
pub mod extract;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use extract::{CurrentAccount, SessionGate};
