use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfile {
    pub id: Uuid,
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

/// Work-authorization category. Stored as text; every consumer matches
/// exhaustively so an unknown value fails at decode, not silently downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum VisaStatus {
    Citizen,
    PermanentResident,
    WorkPermit,
    RequiresSponsorship,
}

impl VisaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisaStatus::Citizen => "citizen",
            VisaStatus::PermanentResident => "permanent_resident",
            VisaStatus::WorkPermit => "work_permit",
            VisaStatus::RequiresSponsorship => "requires_sponsorship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum Availability {
    Immediate,
    TwoWeeks,
    OneMonth,
    ThreeMonths,
    NotLooking,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Immediate => "immediate",
            Availability::TwoWeeks => "two_weeks",
            Availability::OneMonth => "one_month",
            Availability::ThreeMonths => "three_months",
            Availability::NotLooking => "not_looking",
        }
    }
}
