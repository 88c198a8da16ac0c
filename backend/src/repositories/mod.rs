pub mod audit_log;
pub mod common;
pub mod job;
pub mod transaction;

pub use job::*;
pub use transaction::*;
