//! Identity store
//!
//! Identities are looked up through the `IdentityStore` trait so the seeded
//! in-process store can be swapped for a real user-management backend without
//! touching the workflows. Passwords are kept as argon2 PHC strings only.

use std::collections::HashMap;

use alumnet_core::models::{Identity, Role};
use alumnet_core::AppError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

pub trait IdentityStore: Send + Sync {
    fn lookup(&self, email: &str) -> Option<Identity>;

    /// Check `password` against the stored hash for `email`. Unknown emails never verify.
    fn verify(&self, email: &str, password: &str) -> bool;

    /// All identities holding `role`, in insertion order
    fn identities(&self, role: Role) -> Vec<Identity>;
}

/// Hash a password for storage
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

struct CredentialEntry {
    identity: Identity,
    password_hash: String,
}

/// Fixed, in-process identity store
#[derive(Default)]
pub struct StaticIdentityStore {
    entries: Vec<CredentialEntry>,
    by_email: HashMap<String, usize>,
}

impl StaticIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identity with a plaintext password, which is hashed before it is kept.
    ///
    /// Emails are unique keys (case-insensitive) and only one admin may exist.
    pub fn insert(&mut self, identity: Identity, password: &str) -> Result<(), AppError> {
        let key = normalize_email(&identity.email);
        if self.by_email.contains_key(&key) {
            return Err(AppError::Validation(format!(
                "Identity {} already exists",
                identity.email
            )));
        }
        if identity.is_admin() && self.entries.iter().any(|e| e.identity.is_admin()) {
            return Err(AppError::Validation(
                "Only one admin identity is allowed".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;
        self.by_email.insert(key, self.entries.len());
        self.entries.push(CredentialEntry {
            identity,
            password_hash,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, email: &str) -> Option<&CredentialEntry> {
        self.by_email
            .get(&normalize_email(email))
            .and_then(|&idx| self.entries.get(idx))
    }
}

impl IdentityStore for StaticIdentityStore {
    fn lookup(&self, email: &str) -> Option<Identity> {
        self.entry(email).map(|e| e.identity.clone())
    }

    fn verify(&self, email: &str, password: &str) -> bool {
        let Some(entry) = self.entry(email) else {
            return false;
        };
        match verify_password(password, &entry.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(
                    email = %email,
                    error = %e,
                    "Stored credential could not be parsed"
                );
                false
            }
        }
    }

    fn identities(&self, role: Role) -> Vec<Identity> {
        self.entries
            .iter()
            .filter(|e| e.identity.role == role)
            .map(|e| e.identity.clone())
            .collect()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
