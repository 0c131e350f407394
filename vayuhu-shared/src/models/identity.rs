use serde::{Deserialize, Serialize};

use crate::pii::Masked;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(deserialize_with = "crate::models::de::id")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Admin {
    #[serde(deserialize_with = "crate::models::de::id")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Who the session belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Identity {
    User(User),
    Admin(Admin),
}

impl Identity {
    pub fn id(&self) -> i64 {
        match self {
            Identity::User(user) => user.id,
            Identity::Admin(admin) => admin.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Identity::User(user) => user.name.as_deref(),
            Identity::Admin(admin) => admin.name.as_deref(),
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::User(user) => user.email.as_deref(),
            Identity::Admin(admin) => admin.email.as_deref(),
        }
    }

    /// The id sent as `user_id` on user-scoped requests. Admins have none.
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Identity::User(user) => Some(user.id),
            Identity::Admin(_) => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Admin(_))
    }
}

/// Identity plus bearer token, issued at login and kept until logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub identity: Identity,
    pub token: Masked<String>,
}

impl Session {
    pub fn new(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            identity,
            token: Masked::new(token.into()),
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose())
    }
}
