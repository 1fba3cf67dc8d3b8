use crate::dto::filters::{BindValue, JobFilter};
use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::Result;
use crate::models::job::JobPosting;
use sqlx::PgPool;
use uuid::Uuid;

const JOB_COLUMNS: &str = "id, title, location, job_type, experience_level, required_skills, \
     preferred_skills, experience_required, description, created_at, updated_at";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: &CreateJobPayload) -> Result<JobPosting> {
        let sql = format!(
            "INSERT INTO jobs (title, location, job_type, experience_level, required_skills, \
             preferred_skills, experience_required, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {JOB_COLUMNS}"
        );
        let job = sqlx::query_as::<_, JobPosting>(&sql)
            .bind(&payload.title)
            .bind(&payload.location)
            .bind(payload.job_type.as_str())
            .bind(payload.experience_level.as_str())
            .bind(&payload.required_skills)
            .bind(&payload.preferred_skills)
            .bind(payload.experience_required)
            .bind(&payload.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateJobPayload) -> Result<JobPosting> {
        let sql = format!(
            "UPDATE jobs SET \
             title = COALESCE($2, title), \
             location = COALESCE($3, location), \
             job_type = COALESCE($4, job_type), \
             experience_level = COALESCE($5, experience_level), \
             required_skills = COALESCE($6, required_skills), \
             preferred_skills = COALESCE($7, preferred_skills), \
             experience_required = COALESCE($8, experience_required), \
             description = COALESCE($9, description), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {JOB_COLUMNS}"
        );
        let job = sqlx::query_as::<_, JobPosting>(&sql)
            .bind(id)
            .bind(&payload.title)
            .bind(&payload.location)
            .bind(payload.job_type.map(|t| t.as_str()))
            .bind(payload.experience_level.map(|l| l.as_str()))
            .bind(&payload.required_skills)
            .bind(&payload.preferred_skills)
            .bind(payload.experience_required)
            .bind(&payload.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<JobPosting> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let job = sqlx::query_as::<_, JobPosting>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    /// Execute the composed job filter, newest postings first.
    pub async fn list(&self, filter: &JobFilter) -> Result<Vec<JobPosting>> {
        let (clauses, binds) = filter.sql_clauses(1);
        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        let sql =
            format!("SELECT {JOB_COLUMNS} FROM jobs {where_clause} ORDER BY created_at DESC");

        let mut statement = sqlx::query_as::<_, JobPosting>(&sql);
        for bind in binds {
            statement = match bind {
                BindValue::Text(v) => statement.bind(v),
                BindValue::TextArray(v) => statement.bind(v),
                BindValue::Int(v) => statement.bind(v),
            };
        }
        let jobs = statement.fetch_all(&self.pool).await?;
        Ok(jobs)
    }

    pub async fn list_all(&self) -> Result<Vec<JobPosting>> {
        self.list(&JobFilter::default()).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(crate::error::Error::NotFound("Job not found".into()));
        }
        Ok(())
    }
}
