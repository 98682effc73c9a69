//! Caller-owned audit trail of stock additions.

mod log;

pub use log::{AuditEntry, AuditLog};
