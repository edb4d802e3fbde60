//! Credential port: one-way password hashing.

use tyrehub_domain::error::TyreHubError;

/// Hashes passwords for storage and checks candidates against a stored hash.
///
/// Implementations are synchronous: hashing is CPU work, not IO. Services
/// call them on the blocking pool.
pub trait CredentialHasher {
    /// Produce a self-describing hash (algorithm, parameters and salt included).
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Credential`] when hashing fails.
    fn hash(&self, password: &str) -> Result<String, TyreHubError>;

    /// Check `password` against a hash produced by [`CredentialHasher::hash`].
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Credential`] when `hash` cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, TyreHubError>;
}
