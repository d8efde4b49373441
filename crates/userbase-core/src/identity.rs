//! Identifier minting
//!
//! Identifiers are UUIDv7: a unix-millisecond timestamp followed by random
//! bits, so values sort roughly by creation time and collide only with
//! negligible probability.

use uuid::Uuid;

/// Source of fresh resource identifiers.
pub trait IdentityGenerator: Send + Sync {
    fn new_identifier(&self) -> String;
}

/// Default generator backed by UUIDv7.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdentityGenerator for UuidV7Generator {
    fn new_identifier(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Mint a new identifier with the default generator.
pub fn new_identifier() -> String {
    UuidV7Generator.new_identifier()
}
