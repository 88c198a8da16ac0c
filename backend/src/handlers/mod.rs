pub mod audit_logs;
pub mod jobs;

pub use audit_logs::*;
pub use jobs::*;
