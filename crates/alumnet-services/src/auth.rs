use alumnet_core::models::{Identity, Role};
use alumnet_core::AppError;

use crate::identity::IdentityStore;

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Check credentials for `role`.
///
/// Unknown email, wrong password and wrong role all fail the same way so the
/// caller cannot tell which part was wrong. There is no lockout or rate limit.
pub fn authenticate(
    identities: &dyn IdentityStore,
    email: &str,
    password: &str,
    role: Role,
) -> Result<Identity, AppError> {
    let identity = identities
        .lookup(email)
        .filter(|identity| identity.role == role)
        .ok_or_else(|| {
            tracing::debug!(email = %email, role = %role, "No identity for role");
            AppError::Auth(INVALID_CREDENTIALS.to_string())
        })?;

    if !identities.verify(email, password) {
        tracing::debug!(email = %email, role = %role, "Password mismatch");
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    tracing::info!(email = %identity.email, role = %role, "Authenticated");
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentityStore;

    fn store() -> StaticIdentityStore {
        let mut store = StaticIdentityStore::new();
        store
            .insert(Identity::admin("admin@alumni.edu", "Admin"), "admin123")
            .unwrap();
        store
            .insert(
                Identity::alumni("arjun@alumni.edu", "Arjun", 2018, "MBA"),
                "alumni123",
            )
            .unwrap();
        store
    }

    #[test]
    fn test_admin_login() {
        let store = store();
        let identity = authenticate(&store, "admin@alumni.edu", "admin123", Role::Admin).unwrap();
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_wrong_password_fails() {
        let store = store();
        let err = authenticate(&store, "admin@alumni.edu", "admin", Role::Admin).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_wrong_role_fails() {
        let store = store();
        let err =
            authenticate(&store, "arjun@alumni.edu", "alumni123", Role::Admin).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_failures_do_not_reveal_which_part_was_wrong() {
        let store = store();
        let unknown = authenticate(&store, "nobody@alumni.edu", "x", Role::Admin).unwrap_err();
        let mismatch = authenticate(&store, "admin@alumni.edu", "x", Role::Admin).unwrap_err();
        assert_eq!(unknown.to_string(), mismatch.to_string());
        assert!(!unknown.to_string().contains("nobody@alumni.edu"));
    }
}
