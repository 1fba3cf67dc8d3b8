use crate::error::Result;
use crate::models::category::{JobCategory, JobCategoryLink};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> Result<JobCategory> {
        let category = sqlx::query_as::<_, JobCategory>(
            "INSERT INTO job_categories (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn list(&self) -> Result<Vec<JobCategory>> {
        let categories = sqlx::query_as::<_, JobCategory>(
            "SELECT id, name, created_at FROM job_categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    /// Replace a job's category assignments with the given set.
    pub async fn assign(&self, job_id: Uuid, category_ids: &[Uuid]) -> Result<Vec<JobCategoryLink>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM job_category_map WHERE job_id = $1")
            .bind(job_id)
            .execute(&mut *tx)
            .await?;
        for category_id in category_ids {
            sqlx::query(
                "INSERT INTO job_category_map (job_id, category_id) VALUES ($1, $2) \
                 ON CONFLICT (job_id, category_id) DO NOTHING",
            )
            .bind(job_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        let links = sqlx::query_as::<_, JobCategoryLink>(
            "SELECT job_id, category_id FROM job_category_map WHERE job_id = $1",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(links)
    }
}
