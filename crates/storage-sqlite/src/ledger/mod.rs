pub mod model;
pub mod repository;

pub use model::LedgerEventDB;
pub use repository::LedgerRepository;
