use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::{ExperienceLevel, JobPosting, JobType};
use crate::services::match_service::MatchResult;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub preferred_skills: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub experience_required: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub experience_level: Option<ExperienceLevel>,
    pub required_skills: Option<Vec<String>>,
    pub preferred_skills: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub experience_required: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: uuid::Uuid,
    pub title: String,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub required_skills: Vec<String>,
    pub preferred_skills: Option<Vec<String>>,
    pub experience_required: Option<i32>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
    pub total: usize,
}

/// A job annotated with the candidate's compatibility report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatchResponse {
    pub job: JobResponse,
    #[serde(rename = "match")]
    pub match_result: MatchResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatchListResponse {
    pub items: Vec<JobMatchResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignCategoriesPayload {
    pub category_ids: Vec<uuid::Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1))]
    pub name: String,
}

impl From<JobPosting> for JobResponse {
    fn from(value: JobPosting) -> Self {
        Self {
            id: value.id,
            title: value.title,
            location: value.location,
            job_type: value.job_type,
            experience_level: value.experience_level,
            required_skills: value.required_skills,
            preferred_skills: value.preferred_skills,
            experience_required: value.experience_required,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
