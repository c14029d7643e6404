use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A stored user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Caller-supplied fields of a new user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Partial update of a user; id and creation timestamp are fixed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

impl User {
    pub fn from_new(new: NewUser, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            is_admin: new.is_admin,
            created_at,
        }
    }

    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(is_admin) = patch.is_admin {
            self.is_admin = is_admin;
        }
    }
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self == &UserPatch::default()
    }
}

fn seed_date(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The collection used when no snapshot has been stored yet
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "Admin".to_string(),
            email: "admin@toolhub.dev".to_string(),
            is_admin: true,
            created_at: seed_date(1, 10),
        },
        User {
            id: "2".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            is_admin: false,
            created_at: seed_date(2, 14),
        },
        User {
            id: "3".to_string(),
            name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
            is_admin: false,
            created_at: seed_date(3, 3),
        },
    ]
}
