//! External concerns: storage and snapshot loading

pub mod snapshot;
pub mod storage;

pub use snapshot::PropertySnapshot;
pub use storage::InMemoryRepositoryProvider;
