//! Persistence layer: libSQL-backed storage for leads.

pub mod libsql_backend;
pub mod traits;

pub use libsql_backend::LibSqlLeadStore;
pub use traits::{Lead, LeadStore};
