//! Storage layer
//!
//! Two interchangeable `UserRepository` backends:
//! DashMap (in-memory, process lifetime) and SQLite (embedded, persisted).

pub mod db;
pub mod memory;

#[cfg(test)]
pub(crate) mod contract;

pub use db::SqliteUserRepository;
pub use memory::MemoryUserRepository;
