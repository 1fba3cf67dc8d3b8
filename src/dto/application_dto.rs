use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::application::{Application, ApplicationStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyPayload {
    pub profile_id: Uuid,
    pub job_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusPayload {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateApplicationPayload {
    #[validate(range(min = 0, max = 100))]
    pub rating: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub job_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub job_id: Uuid,
    pub status: ApplicationStatus,
    pub rating: Option<i32>,
    pub skills_snapshot: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationResponse>,
    pub total: usize,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            profile_id: value.profile_id,
            job_id: value.job_id,
            status: value.status,
            rating: value.rating,
            skills_snapshot: value.skills_snapshot,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
