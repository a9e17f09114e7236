use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::ports::SnapshotStore;

/// Storage key for the session snapshot.
pub const USER_KEY: &str = "user";

/// Admin credentials the login stub checks against. Configured from the
/// environment; there is no real user database behind this.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Session holder. The logged-in user is persisted so the session survives
/// restarts; a corrupt snapshot degrades to logged-out.
pub struct AuthStore<S> {
    snapshots: S,
    admin: AdminCredentials,
    user: Option<User>,
}

impl<S: SnapshotStore> AuthStore<S> {
    pub fn load(snapshots: S, admin: AdminCredentials) -> Self {
        let user = match snapshots.load(USER_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("discarding corrupt session snapshot: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("failed to read session snapshot: {e}");
                None
            }
        };
        Self {
            snapshots,
            admin,
            user,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<(), DomainError> {
        if email != self.admin.email || password != self.admin.password {
            return Err(DomainError::InvalidCredentials);
        }
        let user = User {
            id: "1".to_string(),
            name: "Admin".to_string(),
            email: email.to_string(),
            is_admin: true,
        };
        match serde_json::to_string(&user) {
            Ok(json) => {
                if let Err(e) = self.snapshots.save(USER_KEY, &json) {
                    log::error!("failed to persist session snapshot: {e}");
                }
            }
            Err(e) => log::error!("failed to encode session snapshot: {e}"),
        }
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) {
        self.user = None;
        if let Err(e) = self.snapshots.delete(USER_KEY) {
            log::error!("failed to delete session snapshot: {e}");
        }
    }
}
