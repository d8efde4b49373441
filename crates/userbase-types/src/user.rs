//! User types

use serde::{Deserialize, Serialize};

/// User as exchanged with HTTP clients.
///
/// `id` is assigned by the server. It is accepted (and ignored) on create
/// requests and omitted from responses when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: i64) -> Self {
        Self {
            id: String::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
        }
    }
}

/// User as held by a repository.
///
/// `primary_key` is only ever set by the relational store and never leaves
/// the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub primary_key: Option<i64>,
    pub identifier: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}
