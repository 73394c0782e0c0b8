use std::fmt;
use std::str::FromStr;

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use cuid2::CuidConstructor;
use once_cell::sync::Lazy;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool, Transaction};
use astroconsult_config::AuthConfig;
use thiserror::Error;
use tracing::{debug, info};

const MIN_PASSWORD_LENGTH: usize = 8;

static CUID: Lazy<CuidConstructor> = Lazy::new(CuidConstructor::new);

#[derive(Clone)]
pub struct Authenticator {
    pool: SqlitePool,
    session_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user already exists")]
    UserExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
    #[error("session not found")]
    SessionNotFound,
    #[error("session expired")]
    SessionExpired,
    #[error("invalid session token")]
    InvalidSession,
}

impl AuthError {
    /// Whether the error means "no valid session" rather than a fault
    pub fn is_missing_session(&self) -> bool {
        matches!(
            self,
            AuthError::SessionNotFound | AuthError::SessionExpired | AuthError::InvalidSession
        )
    }
}

/// Account role on the consultation platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Astrologer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Astrologer => "astrologer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "astrologer" => Ok(Role::Astrologer),
            "admin" => Ok(Role::Admin),
            other => Err(AuthError::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    #[serde(skip_serializing)]
    pub id: i64,
    pub public_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Role,
}

impl User {
    pub fn caller(&self) -> Caller {
        Caller {
            id: self.public_id.clone(),
            role: self.role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// The authenticated identity behind a request.
///
/// Derived from a session on every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: String,
    pub role: Role,
}

impl Caller {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: AuthConfig) -> Self {
        let ttl_seconds = i64::try_from(config.session_ttl_seconds).unwrap_or(i64::MAX);
        let session_ttl = Duration::try_seconds(ttl_seconds).unwrap_or(Duration::MAX);

        Self { pool, session_ttl }
    }

    pub async fn register_with_password(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
        role: Role,
    ) -> Result<User, AuthError> {
        let email = email.trim().to_ascii_lowercase();
        validate_credentials(&email, password)?;

        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT id FROM users WHERE email = ?")
            .bind(&email)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            return Err(AuthError::UserExists);
        }

        let now = Utc::now();
        let password_hash = self.hash_password(password)?;

        let user = self
            .insert_user(&mut tx, Some(email.clone()), display_name.map(str::to_owned), role)
            .await?;

        sqlx::query(
            "INSERT INTO user_identities (user_id, provider, provider_uid, secret, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind("password")
        .bind(&email)
        .bind(password_hash)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(user = %user.public_id, role = %user.role, "registered account");
        Ok(user)
    }

    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let email = email.trim().to_ascii_lowercase();
        let identity = sqlx::query(
            "SELECT user_id, secret FROM user_identities WHERE provider = 'password' AND provider_uid = ?",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = identity else {
            return Err(AuthError::InvalidCredentials);
        };

        let secret: String = row.try_get("secret")?;
        let stored_hash = PasswordHash::new(&secret)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &stored_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let user_id: i64 = row.try_get("user_id")?;
        self.fetch_user(user_id).await?;

        self.issue_session(user_id).await
    }

    pub async fn authenticate_token(&self, token: &str) -> Result<(User, AuthSession), AuthError> {
        let row = sqlx::query("SELECT user_id, expires_at FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Err(AuthError::SessionNotFound);
        };

        let user_id: i64 = row.try_get("user_id")?;
        let expires_at: String = row.try_get("expires_at")?;

        let expires_at = DateTime::parse_from_rfc3339(&expires_at)
            .map_err(|_| AuthError::InvalidSession)?
            .with_timezone(&Utc);

        if expires_at <= Utc::now() {
            sqlx::query("DELETE FROM sessions WHERE token = ?")
                .bind(token)
                .execute(&self.pool)
                .await?;
            return Err(AuthError::SessionExpired);
        }

        let user = self.fetch_user(user_id).await?;
        let session = AuthSession {
            token: token.to_owned(),
            user_id,
            expires_at,
        };

        Ok((user, session))
    }

    /// Resolve an optional bearer token into the caller identity.
    ///
    /// Missing, unknown, malformed, and expired tokens all resolve to `None`;
    /// only storage faults are reported as errors.
    pub async fn resolve_caller(&self, token: Option<&str>) -> Result<Option<Caller>, AuthError> {
        let Some(token) = token else {
            return Ok(None);
        };

        match self.authenticate_token(token).await {
            Ok((user, _)) => Ok(Some(user.caller())),
            Err(error) if error.is_missing_session() => {
                debug!(%error, "bearer token did not resolve to a session");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    pub async fn revoke_session(&self, token: &str) -> Result<(), AuthError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::SessionNotFound);
        }

        Ok(())
    }

    pub async fn user_profile(&self, user_id: i64) -> Result<User, AuthError> {
        self.fetch_user(user_id).await
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            "SELECT id, public_id, email, display_name, role FROM users WHERE public_id = ?",
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| user_from_row(&row)).transpose()
    }

    async fn insert_user(
        &self,
        tx: &mut Transaction<'_, sqlx::Sqlite>,
        email: Option<String>,
        display_name: Option<String>,
        role: Role,
    ) -> Result<User, AuthError> {
        let now = Utc::now().to_rfc3339();
        let public_id = new_public_id();

        let id = sqlx::query(
            "INSERT INTO users (public_id, email, display_name, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(email.as_deref())
        .bind(display_name.as_deref())
        .bind(role.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?
        .last_insert_rowid();

        Ok(User {
            id,
            public_id,
            email,
            display_name,
            role,
        })
    }

    async fn fetch_user(&self, id: i64) -> Result<User, AuthError> {
        let row = sqlx::query(
            "SELECT id, public_id, email, display_name, role FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        user_from_row(&row)
    }

    async fn issue_session(&self, user_id: i64) -> Result<AuthSession, AuthError> {
        let token = self.generate_session_token();
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.session_ttl)
            .map(|expiry| expiry.min(session_horizon()))
            .unwrap_or_else(session_horizon);

        sqlx::query(
            "INSERT INTO sessions (user_id, token, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&token)
        .bind(now.to_rfc3339())
        .bind(expires_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(AuthSession {
            token,
            user_id,
            expires_at,
        })
    }

    fn hash_password(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    fn generate_session_token(&self) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, AuthError> {
    let role: String = row.try_get("role")?;

    Ok(User {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        role: role.parse()?,
    })
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(AuthError::InvalidInput("email address is malformed".into()));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Latest expiry that still round-trips through an RFC 3339 column (year 9999)
fn session_horizon() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(253_402_300_799, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn new_public_id() -> String {
    CUID.create_id()
}
