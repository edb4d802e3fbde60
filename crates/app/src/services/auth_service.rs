//! Auth service: registration, login, logout and session lookup.

use std::sync::Arc;

use rand::Rng;
use rand::distributions::Alphanumeric;

use tyrehub_domain::account::Registration;
use tyrehub_domain::customer::Customer;
use tyrehub_domain::dealer::Dealer;
use tyrehub_domain::email::Email;
use tyrehub_domain::error::{AuthError, TyreHubError, ValidationError};
use tyrehub_domain::session::{Session, SessionUser};
use tyrehub_domain::time::now;
use tyrehub_domain::user::{PublicUser, Role, User, normalize_email};

use crate::ports::{
    CredentialHasher, CustomerRepository, DealerRepository, Notifier, SessionRepository, Storage,
    UserRepository,
};

const TOKEN_LENGTH: usize = 48;

/// Registration form as submitted. Every field is optional here so that
/// missing input is reported by the service rather than by deserialization.
#[derive(Debug, Default, Clone)]
pub struct RegisterUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub address: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub tax_number: Option<String>,
}

fn required<'a>(value: Option<&'a String>, field: &'static str) -> Result<&'a str, ValidationError> {
    value
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ValidationError::MissingField(field))
}

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Application service for account creation and sessions.
pub struct AuthService<S, H, N> {
    storage: Arc<S>,
    hasher: Arc<H>,
    notifier: Arc<N>,
    session_ttl_hours: u32,
}

impl<S, H, N> AuthService<S, H, N>
where
    S: Storage,
    H: CredentialHasher + Send + Sync + 'static,
    N: Notifier + Send + Sync,
{
    /// Create a new service. Sessions it opens live for `session_ttl_hours`.
    pub fn new(storage: Arc<S>, hasher: Arc<H>, notifier: Arc<N>, session_ttl_hours: u32) -> Self {
        Self {
            storage,
            hasher,
            notifier,
            session_ttl_hours,
        }
    }

    /// Hash on the blocking pool; argon2 would otherwise stall a runtime worker.
    async fn hash_password(&self, password: &str) -> Result<String, TyreHubError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| TyreHubError::Credential(Box::new(err)))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, TyreHubError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| TyreHubError::Credential(Box::new(err)))?
    }

    /// Register a customer or dealer account.
    ///
    /// The user row is written first and the profile second; if the profile
    /// write fails the user row stays behind.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Validation`] for missing fields, an unknown
    /// or disallowed role, or an email already in use. Storage and hashing
    /// errors are propagated.
    #[tracing::instrument(skip_all, fields(role))]
    pub async fn register(&self, form: RegisterUser) -> Result<Registration, TyreHubError> {
        let name = required(form.name.as_ref(), "name")?;
        let email = normalize_email(required(form.email.as_ref(), "email")?)?;
        let password = required(form.password.as_ref(), "password")?;

        let role = match form.role.as_deref().map(str::trim) {
            None | Some("") => Role::Customer,
            Some(raw) => raw.parse::<Role>()?,
        };
        tracing::Span::current().record("role", role.as_str());
        if role == Role::Admin {
            return Err(ValidationError::RoleNotAllowed(role).into());
        }
        if role == Role::Dealer {
            required(form.business_name.as_ref(), "business_name")?;
        }

        if self.storage.users().find_by_email(&email).await?.is_some() {
            return Err(ValidationError::UserAlreadyExists.into());
        }

        let mut builder = User::builder()
            .name(name)
            .email(email)
            .role(role)
            .password_hash(self.hash_password(password).await?);
        if let Some(phone) = form.phone {
            builder = builder.phone(phone);
        }
        let user = self.storage.users().create(builder.build()?).await?;

        let profile = match role {
            Role::Dealer => {
                let dealer = Dealer::for_user(
                    user.id,
                    form.business_name.as_deref().unwrap_or_default(),
                    form.business_address,
                    form.tax_number,
                )?;
                self.storage
                    .dealers()
                    .create(dealer)
                    .await
                    .map(|dealer| (None, Some(dealer)))
            }
            _ => self
                .storage
                .customers()
                .create(Customer::for_user(user.id, form.address))
                .await
                .map(|customer| (Some(customer), None)),
        };
        let (customer, dealer) = profile.inspect_err(|err| {
            tracing::error!(user_id = %user.id, error = %err, "profile creation failed after user was stored");
        })?;

        if let Err(err) = self.notifier.send(Email::welcome(&user)).await {
            tracing::warn!(user_id = %user.id, error = %err, "welcome email not sent");
        }

        tracing::info!(user_id = %user.id, "user registered");
        Ok(Registration {
            user: user.to_public(),
            customer,
            dealer,
        })
    }

    /// Check credentials and open a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email or a
    /// wrong password, without saying which.
    #[tracing::instrument(skip_all)]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Session, PublicUser), TyreHubError> {
        let Ok(email) = normalize_email(email) else {
            return Err(AuthError::InvalidCredentials.into());
        };
        let Some(user) = self.storage.users().find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !self.verify_password(password, &user.password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let session = Session::start(generate_token(), user.id, self.session_ttl_hours, now());
        let session = self.storage.sessions().create(session).await?;
        tracing::info!(user_id = %user.id, "session opened");
        Ok((session, user.to_public()))
    }

    /// Close a session. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn logout(&self, token: &str) -> Result<(), TyreHubError> {
        self.storage.sessions().delete(token).await
    }

    /// Resolve a bearer token to the calling user.
    ///
    /// Returns `None` for unknown or expired tokens and for sessions whose
    /// user no longer exists. Expired sessions are removed on sight.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<SessionUser>, TyreHubError> {
        let Some(session) = self.storage.sessions().get(token).await? else {
            return Ok(None);
        };
        if session.is_expired(now()) {
            self.storage.sessions().delete(token).await?;
            return Ok(None);
        }
        let user = self.storage.users().get_by_id(session.user_id).await?;
        Ok(user.as_ref().map(SessionUser::from))
    }

    /// Make sure an administrator account with `email` exists.
    ///
    /// An existing account is left untouched, whatever its role.
    ///
    /// # Errors
    ///
    /// Returns [`TyreHubError::Validation`] for blank input, or storage and
    /// hashing errors.
    pub async fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, TyreHubError> {
        let email = normalize_email(email)?;
        if let Some(existing) = self.storage.users().find_by_email(&email).await? {
            if existing.role != Role::Admin {
                tracing::warn!(email = %email, role = %existing.role, "bootstrap admin email belongs to a non-admin account");
            }
            return Ok(existing.to_public());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        let admin = User::builder()
            .name(name)
            .email(email)
            .role(Role::Admin)
            .password_hash(self.hash_password(password).await?)
            .build()?;
        let admin = self.storage.users().create(admin).await?;
        tracing::info!(user_id = %admin.id, "admin account created");
        Ok(admin.to_public())
    }
}
