//! Host store user records

use serde::{Deserialize, Serialize};

/// The authenticated user on whose behalf permissions are evaluated.
///
/// Only the id participates in any decision here; profile fields stay with
/// the host store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user id
    pub id: String,
}

impl User {
    /// Create a user record from an id
    pub fn new(id: impl Into<String>) -> Self {
        User { id: id.into() }
    }
}
