pub mod account;
pub mod audit;
pub mod email;
pub mod job;
pub mod password;
pub mod session;
pub mod tokens;
