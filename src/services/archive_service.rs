use crate::error::Result;
use crate::models::application::Application;
use crate::models::category::{JobCategory, JobCategoryLink};
use crate::models::job::JobPosting;
use crate::models::profile::CandidateProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// One self-contained dump of the five operational collections. Written and
/// read by the export/import binaries; not used by the request path.
#[derive(Debug, Serialize, Deserialize)]
pub struct Archive {
    pub exported_at: DateTime<Utc>,
    pub profiles: Vec<CandidateProfile>,
    pub jobs: Vec<JobPosting>,
    pub applications: Vec<Application>,
    pub job_categories: Vec<JobCategory>,
    pub job_category_map: Vec<JobCategoryLink>,
}

pub struct ArchiveService;

impl ArchiveService {
    pub async fn dump(pool: &PgPool) -> Result<Archive> {
        let profiles = sqlx::query_as::<_, CandidateProfile>(
            "SELECT id, email, name, bio, links, cv_url, skills, experience_years, \
             current_location, visa_status, availability, created_at, updated_at \
             FROM profiles ORDER BY created_at",
        )
        .fetch_all(pool)
        .await?;

        let jobs = sqlx::query_as::<_, JobPosting>(
            "SELECT id, title, location, job_type, experience_level, required_skills, \
             preferred_skills, experience_required, description, created_at, updated_at \
             FROM jobs ORDER BY created_at",
        )
        .fetch_all(pool)
        .await?;

        let applications = sqlx::query_as::<_, Application>(
            "SELECT id, profile_id, job_id, status, rating, skills_snapshot, created_at, \
             updated_at FROM applications ORDER BY created_at",
        )
        .fetch_all(pool)
        .await?;

        let job_categories = sqlx::query_as::<_, JobCategory>(
            "SELECT id, name, created_at FROM job_categories ORDER BY name",
        )
        .fetch_all(pool)
        .await?;

        let job_category_map = sqlx::query_as::<_, JobCategoryLink>(
            "SELECT job_id, category_id FROM job_category_map",
        )
        .fetch_all(pool)
        .await?;

        Ok(Archive {
            exported_at: Utc::now(),
            profiles,
            jobs,
            applications,
            job_categories,
            job_category_map,
        })
    }

    /// Upsert every collection from the archive. Conflict keys: `name` for
    /// categories, `id` for profiles/jobs/applications, the pair key for the
    /// category map.
    pub async fn restore(pool: &PgPool, archive: &Archive) -> Result<()> {
        let mut tx = pool.begin().await?;

        for p in &archive.profiles {
            sqlx::query(
                "INSERT INTO profiles (id, email, name, bio, links, cv_url, skills, \
                 experience_years, current_location, visa_status, availability, created_at, \
                 updated_at) \
                 VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13) \
                 ON CONFLICT (id) DO UPDATE SET \
                 email = EXCLUDED.email, name = EXCLUDED.name, bio = EXCLUDED.bio, \
                 links = EXCLUDED.links, cv_url = EXCLUDED.cv_url, skills = EXCLUDED.skills, \
                 experience_years = EXCLUDED.experience_years, \
                 current_location = EXCLUDED.current_location, \
                 visa_status = EXCLUDED.visa_status, availability = EXCLUDED.availability, \
                 updated_at = EXCLUDED.updated_at",
            )
            .bind(p.id)
            .bind(&p.email)
            .bind(&p.name)
            .bind(&p.bio)
            .bind(&p.links)
            .bind(&p.cv_url)
            .bind(&p.skills)
            .bind(p.experience_years)
            .bind(&p.current_location)
            .bind(p.visa_status.as_str())
            .bind(p.availability.as_str())
            .bind(p.created_at)
            .bind(p.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for j in &archive.jobs {
            sqlx::query(
                "INSERT INTO jobs (id, title, location, job_type, experience_level, \
                 required_skills, preferred_skills, experience_required, description, \
                 created_at, updated_at) \
                 VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11) \
                 ON CONFLICT (id) DO UPDATE SET \
                 title = EXCLUDED.title, location = EXCLUDED.location, \
                 job_type = EXCLUDED.job_type, experience_level = EXCLUDED.experience_level, \
                 required_skills = EXCLUDED.required_skills, \
                 preferred_skills = EXCLUDED.preferred_skills, \
                 experience_required = EXCLUDED.experience_required, \
                 description = EXCLUDED.description, updated_at = EXCLUDED.updated_at",
            )
            .bind(j.id)
            .bind(&j.title)
            .bind(&j.location)
            .bind(j.job_type.as_str())
            .bind(j.experience_level.as_str())
            .bind(&j.required_skills)
            .bind(&j.preferred_skills)
            .bind(j.experience_required)
            .bind(&j.description)
            .bind(j.created_at)
            .bind(j.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for c in &archive.job_categories {
            sqlx::query(
                "INSERT INTO job_categories (id, name, created_at) VALUES ($1,$2,$3) \
                 ON CONFLICT (name) DO UPDATE SET created_at = EXCLUDED.created_at",
            )
            .bind(c.id)
            .bind(&c.name)
            .bind(c.created_at)
            .execute(&mut *tx)
            .await?;
        }

        for a in &archive.applications {
            sqlx::query(
                "INSERT INTO applications (id, profile_id, job_id, status, rating, \
                 skills_snapshot, created_at, updated_at) \
                 VALUES ($1,$2,$3,$4,$5,$6,$7,$8) \
                 ON CONFLICT (id) DO UPDATE SET \
                 status = EXCLUDED.status, rating = EXCLUDED.rating, \
                 skills_snapshot = EXCLUDED.skills_snapshot, updated_at = EXCLUDED.updated_at",
            )
            .bind(a.id)
            .bind(a.profile_id)
            .bind(a.job_id)
            .bind(a.status.as_str())
            .bind(a.rating)
            .bind(&a.skills_snapshot)
            .bind(a.created_at)
            .bind(a.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for link in &archive.job_category_map {
            sqlx::query(
                "INSERT INTO job_category_map (job_id, category_id) VALUES ($1,$2) \
                 ON CONFLICT (job_id, category_id) DO NOTHING",
            )
            .bind(link.job_id)
            .bind(link.category_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{ExperienceLevel, JobType};
    use crate::models::profile::{Availability, VisaStatus};

    #[test]
    fn archive_round_trips_through_json() {
        let archive = Archive {
            exported_at: Utc::now(),
            profiles: vec![CandidateProfile {
                id: uuid::Uuid::new_v4(),
                email: "alice@example.com".into(),
                name: "Alice".into(),
                bio: None,
                links: vec!["https://example.com".into()],
                cv_url: None,
                skills: vec!["Rust".into()],
                experience_years: Some(3),
                current_location: Some("Stockholm".into()),
                visa_status: VisaStatus::Citizen,
                availability: Availability::TwoWeeks,
                created_at: None,
                updated_at: None,
            }],
            jobs: vec![JobPosting {
                id: uuid::Uuid::new_v4(),
                title: "Engineer".into(),
                location: "Remote".into(),
                job_type: JobType::FullTime,
                experience_level: ExperienceLevel::Mid,
                required_skills: vec!["Rust".into()],
                preferred_skills: None,
                experience_required: Some(2),
                description: None,
                created_at: None,
                updated_at: None,
            }],
            applications: vec![],
            job_categories: vec![],
            job_category_map: vec![],
        };

        let raw = serde_json::to_string(&archive).unwrap();
        assert!(raw.contains("exported_at"));
        let back: Archive = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.profiles.len(), 1);
        assert_eq!(back.profiles[0].visa_status, VisaStatus::Citizen);
        assert_eq!(back.jobs[0].required_skills, vec!["Rust".to_string()]);
    }
}
