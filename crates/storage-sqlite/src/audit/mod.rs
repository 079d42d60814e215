pub mod model;
pub mod repository;

pub use model::AuditSnapshotDB;
pub use repository::AuditRepository;
