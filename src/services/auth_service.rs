use crate::dto::profile_dto::RegisterProfilePayload;
use crate::error::{Error, Result};
use crate::models::profile::CandidateProfile;
use crate::models::user::{User, UserRole};
use crate::services::profile_service::ProfileService;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::issue_jwt;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, email, name, role, password_hash, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User> {
        let mut tx = self.pool.begin().await?;
        let user = self
            .create_user_in(&mut tx, email, name, password, role)
            .await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn create_user_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        name: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User> {
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut **tx)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "An account with this email already exists".into(),
            ));
        }

        let password_hash = hash_password(password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        let sql = format!(
            "INSERT INTO users (email, name, role, password_hash, is_active) \
             VALUES ($1, $2, $3, $4, TRUE) \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(name)
            .bind(role.as_str())
            .bind(password_hash)
            .fetch_one(&mut **tx)
            .await?;
        Ok(user)
    }

    /// Create the login account and the candidate profile in one
    /// transaction. A failed profile insert rolls the account back too,
    /// so the email stays free for another attempt.
    pub async fn register_candidate(
        &self,
        profiles: &ProfileService,
        payload: &RegisterProfilePayload,
    ) -> Result<(User, CandidateProfile)> {
        let mut tx = self.pool.begin().await?;
        let user = self
            .create_user_in(
                &mut tx,
                &payload.email,
                &payload.name,
                &payload.password,
                UserRole::Candidate,
            )
            .await?;
        let profile = profiles.create_in(&mut tx, payload).await?;
        tx.commit().await?;
        Ok((user, profile))
    }

    /// Verify credentials and issue a signed token. The same opaque
    /// Unauthorized error covers unknown email, bad password and disabled
    /// accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".into()))?;

        if !user.is_active {
            return Err(Error::Unauthorized("Invalid credentials".into()));
        }
        let ok = verify_password(password, &user.password_hash)
            .map_err(|_| Error::Unauthorized("Invalid credentials".into()))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid credentials".into()));
        }

        let token = issue_jwt(user.id, user.role)?;
        Ok((user, token))
    }

    /// Idempotent admin bootstrap from configuration. Returns whether a new
    /// account was created.
    pub async fn seed_admin(&self) -> Result<bool> {
        let config = crate::config::get_config();
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&config.admin_email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }
        self.create_user(
            &config.admin_email,
            "Administrator",
            &config.admin_password,
            UserRole::Admin,
        )
        .await?;
        Ok(true)
    }
}
