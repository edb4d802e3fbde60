//! Argon2 implementation of the [`CredentialHasher`] port.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use tyrehub_domain::error::TyreHubError;

use crate::ports::CredentialHasher;

/// Hashes passwords with Argon2id (default parameters) and a random salt,
/// producing PHC strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn credential_error(err: &password_hash::Error) -> TyreHubError {
    TyreHubError::Credential(err.to_string().into())
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, TyreHubError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| credential_error(&err))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, TyreHubError> {
        let parsed = PasswordHash::new(hash).map_err(|err| credential_error(&err))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(credential_error(&err)),
        }
    }
}
