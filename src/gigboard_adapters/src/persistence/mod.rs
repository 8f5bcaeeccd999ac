pub mod in_memory;
pub mod postgres_account_store;
pub mod postgres_audit_log;
pub mod postgres_job_store;
