use crate::dto::filters::{BindValue, ProfileFilter};
use crate::dto::profile_dto::{RegisterProfilePayload, UpdateProfilePayload};
use crate::error::Result;
use crate::models::profile::CandidateProfile;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

const PROFILE_COLUMNS: &str = "id, email, name, bio, links, cv_url, skills, experience_years, \
     current_location, visa_status, availability, created_at, updated_at";

#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a profile inside the caller's transaction; registration pairs
    /// this with the account insert so the two commit or roll back together.
    pub async fn create_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payload: &RegisterProfilePayload,
    ) -> Result<CandidateProfile> {
        let sql = format!(
            "INSERT INTO profiles (email, name, bio, links, cv_url, skills, experience_years, \
             current_location, visa_status, availability) \
             VALUES ($1, $2, $3, $4, NULL, $5, $6, $7, $8, $9) \
             RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, CandidateProfile>(&sql)
            .bind(&payload.email)
            .bind(&payload.name)
            .bind(&payload.bio)
            .bind(&payload.links)
            .bind(&payload.skills)
            .bind(payload.experience_years)
            .bind(&payload.current_location)
            .bind(payload.visa_status.as_str())
            .bind(payload.availability.as_str())
            .fetch_one(&mut **tx)
            .await?;
        Ok(profile)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CandidateProfile> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1");
        let profile = sqlx::query_as::<_, CandidateProfile>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(profile)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<CandidateProfile>> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE email = $1");
        let profile = sqlx::query_as::<_, CandidateProfile>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateProfilePayload,
    ) -> Result<CandidateProfile> {
        let sql = format!(
            "UPDATE profiles SET \
             name = COALESCE($2, name), \
             bio = COALESCE($3, bio), \
             links = COALESCE($4, links), \
             skills = COALESCE($5, skills), \
             experience_years = COALESCE($6, experience_years), \
             current_location = COALESCE($7, current_location), \
             visa_status = COALESCE($8, visa_status), \
             availability = COALESCE($9, availability), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, CandidateProfile>(&sql)
            .bind(id)
            .bind(&payload.name)
            .bind(&payload.bio)
            .bind(&payload.links)
            .bind(&payload.skills)
            .bind(payload.experience_years)
            .bind(&payload.current_location)
            .bind(payload.visa_status.map(|v| v.as_str()))
            .bind(payload.availability.map(|a| a.as_str()))
            .fetch_one(&self.pool)
            .await?;
        Ok(profile)
    }

    pub async fn update_cv(&self, id: Uuid, cv_url: &str) -> Result<CandidateProfile> {
        let sql = format!(
            "UPDATE profiles SET cv_url = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, CandidateProfile>(&sql)
            .bind(id)
            .bind(cv_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(profile)
    }

    /// Execute the composed filter against the profiles table. Active
    /// filters AND together; the source's default order (newest first) is
    /// preserved. A failed query surfaces the database error as-is.
    pub async fn list(&self, filter: &ProfileFilter) -> Result<Vec<CandidateProfile>> {
        let (clauses, binds) = filter.sql_clauses(1);
        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles {where_clause} ORDER BY created_at DESC"
        );

        let mut statement = sqlx::query_as::<_, CandidateProfile>(&sql);
        for bind in binds {
            statement = match bind {
                BindValue::Text(v) => statement.bind(v),
                BindValue::TextArray(v) => statement.bind(v),
                BindValue::Int(v) => statement.bind(v),
            };
        }
        let profiles = statement.fetch_all(&self.pool).await?;
        Ok(profiles)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(crate::error::Error::NotFound("Profile not found".into()));
        }
        Ok(())
    }

    /// Profiles untouched for longer than the retention window, oldest first.
    pub async fn list_stale(&self, cutoff_days: i64) -> Result<Vec<CandidateProfile>> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles \
             WHERE COALESCE(updated_at, created_at) < NOW() - make_interval(days => $1) \
             ORDER BY COALESCE(updated_at, created_at) ASC"
        );
        let profiles = sqlx::query_as::<_, CandidateProfile>(&sql)
            .bind(cutoff_days as i32)
            .fetch_all(&self.pool)
            .await?;
        Ok(profiles)
    }
}
