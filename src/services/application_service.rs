use crate::dto::application_dto::ApplicationListQuery;
use crate::error::Result;
use crate::models::application::{Application, ApplicationStatus};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

const APPLICATION_COLUMNS: &str =
    "id, profile_id, job_id, status, rating, skills_snapshot, created_at, updated_at";

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit an application, snapshotting the candidate's skills at the
    /// time of applying. Re-applying to the same job refreshes the snapshot
    /// instead of failing.
    pub async fn apply(
        &self,
        profile_id: Uuid,
        job_id: Uuid,
        skills_snapshot: &[String],
    ) -> Result<Application> {
        let sql = format!(
            "INSERT INTO applications (profile_id, job_id, status, skills_snapshot) \
             VALUES ($1, $2, 'pending', $3) \
             ON CONFLICT (profile_id, job_id) \
             DO UPDATE SET skills_snapshot = EXCLUDED.skills_snapshot, updated_at = NOW() \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(profile_id)
            .bind(job_id)
            .bind(skills_snapshot)
            .fetch_one(&self.pool)
            .await?;
        Ok(application)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        let sql = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1");
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(application)
    }

    pub async fn list_for_profile(&self, profile_id: Uuid) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE profile_id = $1 ORDER BY created_at DESC"
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(profile_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }

    pub async fn list(&self, query: &ApplicationListQuery) -> Result<Vec<Application>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut index = 1;
        if query.job_id.is_some() {
            clauses.push(format!("job_id = ${index}"));
            index += 1;
        }
        if query.status.is_some() {
            clauses.push(format!("status = ${index}"));
        }
        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications {where_clause} \
             ORDER BY created_at DESC"
        );

        let mut statement = sqlx::query_as::<_, Application>(&sql);
        if let Some(job_id) = query.job_id {
            statement = statement.bind(job_id);
        }
        if let Some(status) = query.status {
            statement = statement.bind(status.as_str());
        }
        let applications = statement.fetch_all(&self.pool).await?;
        Ok(applications)
    }

    /// Any status may move to any other; no transition graph is enforced.
    pub async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
        let sql = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(application)
    }

    pub async fn update_rating(&self, id: Uuid, rating: i32) -> Result<Application> {
        let sql = format!(
            "UPDATE applications SET rating = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .bind(rating)
            .fetch_one(&self.pool)
            .await?;
        Ok(application)
    }

    pub async fn status_counts(&self) -> Result<HashMap<String, i64>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM applications GROUP BY status")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}
