//! Port traits (interfaces) for dependency injection

pub mod storage;

pub use storage::UserRepository;
