//! Userbase Types - Pure type definitions
//!
//! This crate contains only plain data types with no async runtime
//! dependencies: the wire entity exchanged with HTTP clients and the
//! storage entity held by repositories.

pub mod user;

pub use user::*;
