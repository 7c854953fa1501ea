use alumnet_core::models::{Identity, Role};
use alumnet_core::AppError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An authenticated session. Created by `PortalState::login`, consumed by `PortalState::logout`.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    identity: Identity,
    started_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn start(identity: Identity) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn email(&self) -> &str {
        &self.identity.email
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.identity.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "This action requires an admin session".to_string(),
            ))
        }
    }
}
