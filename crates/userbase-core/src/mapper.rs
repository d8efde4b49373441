//! Translation between the wire entity and the storage entity

use crate::identity::{IdentityGenerator, UuidV7Generator};
use userbase_types::{User, UserRecord};

/// Storage to wire. The primary key stays behind.
pub fn to_wire(record: UserRecord) -> User {
    User {
        id: record.identifier,
        first_name: record.first_name,
        last_name: record.last_name,
        age: record.age,
    }
}

/// Wire to storage, minting a fresh identifier.
///
/// Any caller-supplied `id` is discarded: the server owns identity.
pub fn to_storage(user: User) -> UserRecord {
    to_storage_with(user, &UuidV7Generator)
}

pub fn to_storage_with<G: IdentityGenerator + ?Sized>(user: User, ids: &G) -> UserRecord {
    UserRecord {
        primary_key: None,
        identifier: ids.new_identifier(),
        first_name: user.first_name,
        last_name: user.last_name,
        age: user.age,
    }
}
