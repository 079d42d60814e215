pub mod model;
pub mod repository;

pub use model::BalanceCacheEntryDB;
pub use repository::CacheRepository;
