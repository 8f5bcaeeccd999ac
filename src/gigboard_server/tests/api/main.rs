//! Black-box tests against the assembled router. Each test spawns its own
//! server on an ephemeral port, backed by the in-memory stores, and talks
//! to it over real HTTP the way the frontend does.

mod helpers;

mod login;
mod profile;
mod register;
mod verify_email;
