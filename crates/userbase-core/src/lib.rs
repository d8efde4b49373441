//! Userbase Core Library
//!
//! Error taxonomy, identifier minting, wire/storage mapping and the
//! repository port shared by every storage backend.

// Re-export pure types from userbase-types
pub use userbase_types::*;

pub mod error;
pub mod identity;
pub mod mapper;
pub mod ports;

pub use error::{Result, UserbaseError};
pub use identity::{new_identifier, IdentityGenerator, UuidV7Generator};
pub use mapper::{to_storage, to_storage_with, to_wire};
pub use ports::UserRepository;
