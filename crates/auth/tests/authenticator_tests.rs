use std::str::FromStr;

use chrono::{Duration, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Row, SqlitePool,
};
use astroconsult_auth::{AuthError, Authenticator, Caller, Role};
use astroconsult_config::AuthConfig;
use astroconsult_database::MIGRATOR;
use tempfile::TempDir;

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

fn default_auth_config() -> AuthConfig {
    AuthConfig {
        session_ttl_seconds: 3_600,
    }
}

struct TestContext {
    pool: SqlitePool,
    authenticator: Authenticator,
    _temp_dir: TempDir,
}

impl TestContext {
    async fn new(config: AuthConfig) -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("auth.sqlite");
        let db_url = format!("sqlite://{}", db_path.display());

        let mut options = SqliteConnectOptions::from_str(&db_url)?;
        options = options.create_if_missing(true);
        options = options.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        MIGRATOR.run(&pool).await?;

        let authenticator = Authenticator::new(pool.clone(), config);

        Ok(Self {
            pool,
            authenticator,
            _temp_dir: temp_dir,
        })
    }

    async fn new_default() -> TestResult<Self> {
        Self::new(default_auth_config()).await
    }

    fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }
}

#[tokio::test]
async fn register_with_password_persists_user_role_and_identity() -> TestResult {
    let ctx = TestContext::new_default().await?;

    let user = ctx
        .authenticator()
        .register_with_password("Guru@Example.com", "correct horse", Some("Guru Dev"), Role::Astrologer)
        .await?;

    assert_eq!(user.email.as_deref(), Some("guru@example.com"));
    assert_eq!(user.role, Role::Astrologer);

    let row = sqlx::query("SELECT role FROM users WHERE public_id = ?")
        .bind(&user.public_id)
        .fetch_one(ctx.pool())
        .await?;
    let role: String = row.try_get("role")?;
    assert_eq!(role, "astrologer");

    let identity = sqlx::query("SELECT provider, secret FROM user_identities WHERE user_id = ?")
        .bind(user.id)
        .fetch_one(ctx.pool())
        .await?;
    let provider: String = identity.try_get("provider")?;
    let secret: String = identity.try_get("secret")?;
    assert_eq!(provider, "password");
    assert!(secret.starts_with("$argon2"));
    assert_ne!(secret, "correct horse");

    Ok(())
}

#[tokio::test]
async fn register_with_password_rejects_duplicate_email() -> TestResult {
    let ctx = TestContext::new_default().await?;

    ctx.authenticator()
        .register_with_password("seeker@example.com", "password-one", None, Role::User)
        .await?;

    let error = ctx
        .authenticator()
        .register_with_password("SEEKER@example.com", "password-two", None, Role::User)
        .await
        .expect_err("duplicate email should be rejected");

    assert!(matches!(error, AuthError::UserExists));
    Ok(())
}

#[tokio::test]
async fn register_with_password_validates_input() -> TestResult {
    let ctx = TestContext::new_default().await?;

    let error = ctx
        .authenticator()
        .register_with_password("seeker@example.com", "short", None, Role::User)
        .await
        .expect_err("short password should be rejected");

    assert!(matches!(error, AuthError::InvalidInput(_)));
    Ok(())
}

#[tokio::test]
async fn login_with_password_returns_session_for_valid_credentials() -> TestResult {
    let ctx = TestContext::new_default().await?;

    let user = ctx
        .authenticator()
        .register_with_password("seeker@example.com", "moonrise-42", None, Role::User)
        .await?;

    let session = ctx
        .authenticator()
        .login_with_password("seeker@example.com", "moonrise-42")
        .await?;

    assert_eq!(session.user_id, user.id);
    assert!(session.expires_at > Utc::now());
    assert!(session.expires_at <= Utc::now() + Duration::seconds(3_600));
    Ok(())
}

#[tokio::test]
async fn login_with_password_rejects_incorrect_secret() -> TestResult {
    let ctx = TestContext::new_default().await?;

    ctx.authenticator()
        .register_with_password("seeker@example.com", "moonrise-42", None, Role::User)
        .await?;

    let error = ctx
        .authenticator()
        .login_with_password("seeker@example.com", "sunset-42")
        .await
        .expect_err("wrong password should fail");

    assert!(matches!(error, AuthError::InvalidCredentials));
    Ok(())
}

#[tokio::test]
async fn login_with_password_rejects_unknown_email() -> TestResult {
    let ctx = TestContext::new_default().await?;

    let error = ctx
        .authenticator()
        .login_with_password("nobody@example.com", "whatever-123")
        .await
        .expect_err("unknown email should fail");

    assert!(matches!(error, AuthError::InvalidCredentials));
    Ok(())
}

#[tokio::test]
async fn authenticate_token_returns_user_and_session_for_active_token() -> TestResult {
    let ctx = TestContext::new_default().await?;

    let user = ctx
        .authenticator()
        .register_with_password("guru@example.com", "saturn-return", None, Role::Astrologer)
        .await?;
    let session = ctx
        .authenticator()
        .login_with_password("guru@example.com", "saturn-return")
        .await?;

    let (resolved, resolved_session) = ctx.authenticator().authenticate_token(&session.token).await?;

    assert_eq!(resolved.public_id, user.public_id);
    assert_eq!(resolved.role, Role::Astrologer);
    assert_eq!(resolved_session.token, session.token);
    Ok(())
}

#[tokio::test]
async fn authenticate_token_removes_expired_sessions() -> TestResult {
    let ctx = TestContext::new_default().await?;

    let user = ctx
        .authenticator()
        .register_with_password("seeker@example.com", "moonrise-42", None, Role::User)
        .await?;

    let expired = (Utc::now() - Duration::minutes(5)).to_rfc3339();
    sqlx::query("INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)")
        .bind("stale-token")
        .bind(user.id)
        .bind(&expired)
        .bind(&expired)
        .execute(ctx.pool())
        .await?;

    let error = ctx
        .authenticator()
        .authenticate_token("stale-token")
        .await
        .expect_err("expired session should be rejected");
    assert!(matches!(error, AuthError::SessionExpired));

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE token = 'stale-token'")
        .fetch_one(ctx.pool())
        .await?;
    assert_eq!(remaining, 0);
    Ok(())
}

#[tokio::test]
async fn resolve_caller_maps_missing_and_unknown_tokens_to_none() -> TestResult {
    let ctx = TestContext::new_default().await?;

    assert!(ctx.authenticator().resolve_caller(None).await?.is_none());
    assert!(ctx
        .authenticator()
        .resolve_caller(Some("no-such-token"))
        .await?
        .is_none());

    let user = ctx
        .authenticator()
        .register_with_password("seeker@example.com", "moonrise-42", None, Role::User)
        .await?;
    let session = ctx
        .authenticator()
        .login_with_password("seeker@example.com", "moonrise-42")
        .await?;

    let caller = ctx
        .authenticator()
        .resolve_caller(Some(&session.token))
        .await?
        .expect("active token should resolve");
    assert_eq!(caller, Caller::new(user.public_id, Role::User));
    Ok(())
}

#[tokio::test]
async fn revoke_session_invalidates_token() -> TestResult {
    let ctx = TestContext::new_default().await?;

    ctx.authenticator()
        .register_with_password("seeker@example.com", "moonrise-42", None, Role::User)
        .await?;
    let session = ctx
        .authenticator()
        .login_with_password("seeker@example.com", "moonrise-42")
        .await?;

    ctx.authenticator().revoke_session(&session.token).await?;

    let error = ctx
        .authenticator()
        .authenticate_token(&session.token)
        .await
        .expect_err("revoked token should not authenticate");
    assert!(matches!(error, AuthError::SessionNotFound));

    let again = ctx.authenticator().revoke_session(&session.token).await;
    assert!(matches!(again, Err(AuthError::SessionNotFound)));
    Ok(())
}

#[tokio::test]
async fn find_by_public_id_returns_role() -> TestResult {
    let ctx = TestContext::new_default().await?;

    let astrologer = ctx
        .authenticator()
        .register_with_password("guru@example.com", "saturn-return", Some("Guru"), Role::Astrologer)
        .await?;

    let found = ctx
        .authenticator()
        .find_by_public_id(&astrologer.public_id)
        .await?
        .expect("astrologer should be found");
    assert_eq!(found.role, Role::Astrologer);
    assert_eq!(found.display_name.as_deref(), Some("Guru"));

    assert!(ctx.authenticator().find_by_public_id("missing").await?.is_none());
    Ok(())
}
