//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{SessionId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    account::Account, auth_session::AuthSession, credentials::Credentials,
    one_time_token::OneTimeToken,
};
use crate::domain::repository::{
    AccountRepository, AuthSessionRepository, CredentialsRepository, OneTimeTokenRepository,
};
use crate::domain::value_object::{
    email::Email, token_kind::TokenKind, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions and one-time tokens
    pub async fn cleanup_expired(&self) -> AuthResult<(u64, u64)> {
        let sessions = AuthSessionRepository::cleanup_expired(self).await?;
        let tokens = OneTimeTokenRepository::cleanup_expired(self).await?;

        tracing::info!(
            sessions_deleted = sessions,
            tokens_deleted = tokens,
            "Cleaned up expired auth state"
        );

        Ok((sessions, tokens))
    }
}

/// Unique-key violations on sign-up become form errors
fn map_account_conflict(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some("accounts_user_name_key" | "profiles_username_key") => {
                return AuthError::UserNameTaken;
            }
            Some("accounts_email_key") => return AuthError::EmailTaken,
            _ => {}
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn create(&self, account: &Account, credentials: &Credentials) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                user_name,
                email_confirmed_at,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.user_name.as_str())
        .bind(account.email_confirmed_at)
        .bind(account.last_login_at)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_account_conflict)?;

        sqlx::query(
            r#"
            INSERT INTO auth_credentials (
                account_id,
                password_hash,
                login_failed_count,
                last_failed_at,
                locked_until,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(credentials.account_id.as_uuid())
        .bind(credentials.password_hash.as_str())
        .bind(credentials.login_failed_count as i16)
        .bind(credentials.last_failed_at)
        .bind(credentials.locked_until)
        .bind(credentials.created_at)
        .bind(credentials.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, account_id: UserId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                user_name,
                email_confirmed_at,
                last_login_at,
                created_at,
                updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                user_name,
                email_confirmed_at,
                last_login_at,
                created_at,
                updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE user_name = $1)",
        )
        .bind(user_name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts SET
                email_confirmed_at = $2,
                last_login_at = $3,
                updated_at = $4
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email_confirmed_at)
        .bind(account.last_login_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Credentials Repository Implementation
// ============================================================================

impl CredentialsRepository for PgAuthRepository {
    async fn find_by_account_id(&self, account_id: UserId) -> AuthResult<Option<Credentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT
                account_id,
                password_hash,
                login_failed_count,
                last_failed_at,
                locked_until,
                created_at,
                updated_at
            FROM auth_credentials
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialsRow::into_credentials).transpose()
    }

    async fn update(&self, credentials: &Credentials) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_credentials SET
                password_hash = $2,
                login_failed_count = $3,
                last_failed_at = $4,
                locked_until = $5,
                updated_at = $6
            WHERE account_id = $1
            "#,
        )
        .bind(credentials.account_id.as_uuid())
        .bind(credentials.password_hash.as_str())
        .bind(credentials.login_failed_count as i16)
        .bind(credentials.last_failed_at)
        .bind(credentials.locked_until)
        .bind(credentials.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                account_id,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.account_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(&session.client_fingerprint_hash)
        .bind(&session.client_ip)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: SessionId,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let now_ms = Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                account_id,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                if r.client_fingerprint_hash != fingerprint_hash {
                    tracing::warn!(
                        session_id = %session_id,
                        "Auth session fingerprint mismatch"
                    );
                    return Err(AuthError::SessionFingerprintMismatch);
                }
                Ok(Some(r.into_session()))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// One-Time Token Repository Implementation
// ============================================================================

impl OneTimeTokenRepository for PgAuthRepository {
    async fn create(&self, token: &OneTimeToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO one_time_tokens (
                token_hash,
                account_id,
                token_kind,
                expires_at_ms,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&token.token_hash)
        .bind(token.account_id.as_uuid())
        .bind(token.kind.as_str())
        .bind(token.expires_at_ms)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn consume(
        &self,
        token_hash: &[u8],
        kind: TokenKind,
    ) -> AuthResult<Option<OneTimeToken>> {
        // DELETE ... RETURNING makes redemption single-use under concurrency
        let row = sqlx::query_as::<_, OneTimeTokenRow>(
            r#"
            DELETE FROM one_time_tokens
            WHERE token_hash = $1 AND token_kind = $2 AND expires_at_ms > $3
            RETURNING token_hash, account_id, token_kind, expires_at_ms, created_at
            "#,
        )
        .bind(token_hash)
        .bind(kind.as_str())
        .bind(Utc::now().timestamp_millis())
        .fetch_optional(&self.pool)
        .await?;

        row.map(OneTimeTokenRow::into_token).transpose()
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM one_time_tokens WHERE expires_at_ms < $1")
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    user_name: String,
    email_confirmed_at: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            account_id: UserId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            user_name: UserName::from_db(self.user_name),
            email_confirmed_at: self.email_confirmed_at,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    account_id: Uuid,
    password_hash: String,
    login_failed_count: i16,
    last_failed_at: Option<DateTime<Utc>>,
    locked_until: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialsRow {
    fn into_credentials(self) -> AuthResult<Credentials> {
        Ok(Credentials {
            account_id: UserId::from_uuid(self.account_id),
            password_hash: UserPassword::from_db(self.password_hash)?,
            login_failed_count: self.login_failed_count.max(0) as u16,
            last_failed_at: self.last_failed_at,
            locked_until: self.locked_until,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    account_id: Uuid,
    expires_at_ms: i64,
    client_fingerprint_hash: Vec<u8>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: SessionId::from_uuid(self.session_id),
            account_id: UserId::from_uuid(self.account_id),
            expires_at_ms: self.expires_at_ms,
            client_fingerprint_hash: self.client_fingerprint_hash,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OneTimeTokenRow {
    token_hash: Vec<u8>,
    account_id: Uuid,
    token_kind: String,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl OneTimeTokenRow {
    fn into_token(self) -> AuthResult<OneTimeToken> {
        let kind = TokenKind::from_db(&self.token_kind)
            .ok_or_else(|| AuthError::Internal(format!("Invalid token kind: {}", self.token_kind)))?;

        Ok(OneTimeToken {
            token_hash: self.token_hash,
            account_id: UserId::from_uuid(self.account_id),
            kind,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        })
    }
}
