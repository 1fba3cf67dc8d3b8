use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profile::{Availability, CandidateProfile, VisaStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterProfilePayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(range(min = 0))]
    pub experience_years: Option<i32>,
    pub current_location: Option<String>,
    pub visa_status: VisaStatus,
    pub availability: Availability,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub bio: Option<String>,
    pub links: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub experience_years: Option<i32>,
    pub current_location: Option<String>,
    pub visa_status: Option<VisaStatus>,
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCvPayload {
    pub cv_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub name: String,
    pub bio: Option<String>,
    pub links: Vec<String>,
    pub cv_url: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub current_location: Option<String>,
    pub visa_status: VisaStatus,
    pub availability: Availability,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileListResponse {
    pub items: Vec<ProfileResponse>,
    pub total: usize,
}

impl From<CandidateProfile> for ProfileResponse {
    fn from(value: CandidateProfile) -> Self {
        Self {
            id: value.id,
            email: value.email,
            name: value.name,
            bio: value.bio,
            links: value.links,
            cv_url: value.cv_url,
            skills: value.skills,
            experience_years: value.experience_years,
            current_location: value.current_location,
            visa_status: value.visa_status,
            availability: value.availability,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
