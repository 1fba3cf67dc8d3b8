use serde::{Deserialize, Serialize};

use crate::models::job::{ExperienceLevel, JobType};
use crate::models::profile::{Availability, CandidateProfile, VisaStatus};

/// Wraps an enum filter value so query strings may pass `any` to mean
/// "no constraint".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    Any,
    #[serde(untagged)]
    Only(T),
}

impl<T: Copy> Selection<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Selection::Any => None,
            Selection::Only(v) => Some(*v),
        }
    }
}

/// Years-of-experience bracket. Keys mirror the lower bound of each bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBracket {
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "0")]
    EntryLevel,
    #[serde(rename = "2")]
    EarlyCareer,
    #[serde(rename = "4")]
    MidLevel,
    #[serde(rename = "7")]
    Senior,
}

impl ExperienceBracket {
    /// Inclusive bounds; `None` upper bound means unbounded.
    pub fn bounds(&self) -> Option<(i32, Option<i32>)> {
        match self {
            ExperienceBracket::Any => None,
            ExperienceBracket::EntryLevel => Some((0, Some(1))),
            ExperienceBracket::EarlyCareer => Some((2, Some(3))),
            ExperienceBracket::MidLevel => Some((4, Some(6))),
            ExperienceBracket::Senior => Some((7, None)),
        }
    }

    pub fn contains(&self, years: i32) -> bool {
        match self.bounds() {
            None => true,
            Some((lo, hi)) => years >= lo && hi.map_or(true, |h| years <= h),
        }
    }
}

/// Bind value produced by clause assembly, applied in order by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
    Int(i32),
}

/// All-optional search criteria over candidate profiles. Absent fields and
/// `any` selections impose no constraint; active filters AND together, and
/// the free-text search ORs across name, email and bio.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProfileFilter {
    pub search: Option<String>,
    pub experience: Option<ExperienceBracket>,
    pub location: Option<String>,
    /// Comma-separated skill list; rows match when their skill set overlaps.
    pub skills: Option<String>,
    pub visa_status: Option<Selection<VisaStatus>>,
    pub availability: Option<Selection<Availability>>,
}

impl ProfileFilter {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Assemble SQL WHERE clauses with `$n` placeholders starting at
    /// `next_index`. Clause order is fixed but immaterial: the clauses are
    /// ANDed, so any order yields the same predicate.
    pub fn sql_clauses(&self, mut next_index: usize) -> (Vec<String>, Vec<BindValue>) {
        let mut clauses = Vec::new();
        let mut binds = Vec::new();

        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            clauses.push(format!(
                "(name ILIKE ${idx} OR email ILIKE ${idx} OR bio ILIKE ${idx})",
                idx = next_index
            ));
            binds.push(BindValue::Text(format!("%{}%", search.trim())));
            next_index += 1;
        }
        if let Some((lo, hi)) = self.experience.and_then(|b| b.bounds()) {
            match hi {
                Some(hi) => {
                    clauses.push(format!(
                        "experience_years BETWEEN ${} AND ${}",
                        next_index,
                        next_index + 1
                    ));
                    binds.push(BindValue::Int(lo));
                    binds.push(BindValue::Int(hi));
                    next_index += 2;
                }
                None => {
                    clauses.push(format!("experience_years >= ${}", next_index));
                    binds.push(BindValue::Int(lo));
                    next_index += 1;
                }
            }
        }
        if let Some(location) = self.location.as_deref().filter(|s| !s.trim().is_empty()) {
            clauses.push(format!("current_location ILIKE ${}", next_index));
            binds.push(BindValue::Text(format!("%{}%", location.trim())));
            next_index += 1;
        }
        let skill_list = self.skill_list();
        if !skill_list.is_empty() {
            clauses.push(format!("skills && ${}", next_index));
            binds.push(BindValue::TextArray(skill_list));
            next_index += 1;
        }
        if let Some(visa) = self.visa_status.as_ref().and_then(Selection::value) {
            clauses.push(format!("visa_status = ${}", next_index));
            binds.push(BindValue::Text(visa.as_str().to_string()));
            next_index += 1;
        }
        if let Some(availability) = self.availability.as_ref().and_then(Selection::value) {
            clauses.push(format!("availability = ${}", next_index));
            binds.push(BindValue::Text(availability.as_str().to_string()));
        }

        (clauses, binds)
    }

    /// In-memory rendition of the same predicate, for fakes and tests.
    pub fn matches(&self, profile: &CandidateProfile) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let needle = search.trim().to_lowercase();
            let hit = profile.name.to_lowercase().contains(&needle)
                || profile.email.to_lowercase().contains(&needle)
                || profile
                    .bio
                    .as_deref()
                    .map_or(false, |bio| bio.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(bracket) = self.experience {
            if bracket.bounds().is_some() {
                match profile.experience_years {
                    Some(years) if bracket.contains(years) => {}
                    _ => return false,
                }
            }
        }
        if let Some(location) = self.location.as_deref().filter(|s| !s.trim().is_empty()) {
            let needle = location.trim().to_lowercase();
            let hit = profile
                .current_location
                .as_deref()
                .map_or(false, |loc| loc.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        let wanted = self.skill_list();
        if !wanted.is_empty() && !profile.skills.iter().any(|s| wanted.contains(s)) {
            return false;
        }
        if let Some(visa) = self.visa_status.as_ref().and_then(Selection::value) {
            if profile.visa_status != visa {
                return false;
            }
        }
        if let Some(availability) = self.availability.as_ref().and_then(Selection::value) {
            if profile.availability != availability {
                return false;
            }
        }
        true
    }
}

/// All-optional search criteria over job postings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<Selection<JobType>>,
    pub experience_level: Option<Selection<ExperienceLevel>>,
}

impl JobFilter {
    pub fn sql_clauses(&self, mut next_index: usize) -> (Vec<String>, Vec<BindValue>) {
        let mut clauses = Vec::new();
        let mut binds = Vec::new();

        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            clauses.push(format!(
                "(title ILIKE ${idx} OR description ILIKE ${idx})",
                idx = next_index
            ));
            binds.push(BindValue::Text(format!("%{}%", search.trim())));
            next_index += 1;
        }
        if let Some(location) = self.location.as_deref().filter(|s| !s.trim().is_empty()) {
            clauses.push(format!("location ILIKE ${}", next_index));
            binds.push(BindValue::Text(format!("%{}%", location.trim())));
            next_index += 1;
        }
        if let Some(job_type) = self.job_type.as_ref().and_then(Selection::value) {
            clauses.push(format!("job_type = ${}", next_index));
            binds.push(BindValue::Text(job_type.as_str().to_string()));
            next_index += 1;
        }
        if let Some(level) = self.experience_level.as_ref().and_then(Selection::value) {
            clauses.push(format!("experience_level = ${}", next_index));
            binds.push(BindValue::Text(level.as_str().to_string()));
        }

        (clauses, binds)
    }

    pub fn matches(&self, job: &crate::models::job::JobPosting) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let needle = search.trim().to_lowercase();
            let hit = job.title.to_lowercase().contains(&needle)
                || job
                    .description
                    .as_deref()
                    .map_or(false, |d| d.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(location) = self.location.as_deref().filter(|s| !s.trim().is_empty()) {
            let needle = location.trim().to_lowercase();
            if !job.location.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(job_type) = self.job_type.as_ref().and_then(Selection::value) {
            if job.job_type != job_type {
                return false;
            }
        }
        if let Some(level) = self.experience_level.as_ref().and_then(Selection::value) {
            if job.experience_level != level {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        name: &str,
        location: &str,
        experience: Option<i32>,
        visa: VisaStatus,
    ) -> CandidateProfile {
        CandidateProfile {
            id: uuid::Uuid::new_v4(),
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.into(),
            bio: None,
            links: vec![],
            cv_url: None,
            skills: vec!["Rust".into(), "SQL".into()],
            experience_years: experience,
            current_location: Some(location.into()),
            visa_status: visa,
            availability: Availability::Immediate,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ProfileFilter::default();
        let p = profile("Alice", "Stockholm", Some(5), VisaStatus::Citizen);
        assert!(filter.matches(&p));
        let (clauses, binds) = filter.sql_clauses(1);
        assert!(clauses.is_empty());
        assert!(binds.is_empty());
    }

    #[test]
    fn location_substring_and_bracket_narrow_together() {
        let stockholm = profile("Alice", "Stockholm", Some(5), VisaStatus::Citizen);
        let oslo = profile("Bob", "Oslo", Some(1), VisaStatus::WorkPermit);

        let filter = ProfileFilter {
            location: Some("stock".into()),
            experience: Some(ExperienceBracket::MidLevel),
            ..Default::default()
        };

        let kept: Vec<&CandidateProfile> = [&stockholm, &oslo]
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Alice");
    }

    #[test]
    fn any_selection_is_identity() {
        let filter = ProfileFilter {
            visa_status: Some(Selection::Any),
            availability: Some(Selection::Any),
            experience: Some(ExperienceBracket::Any),
            ..Default::default()
        };
        let p = profile("Alice", "Stockholm", None, VisaStatus::RequiresSponsorship);
        assert!(filter.matches(&p));
        let (clauses, _) = filter.sql_clauses(1);
        assert!(clauses.is_empty());
    }

    #[test]
    fn selection_deserializes_any_and_specific() {
        #[derive(serde::Deserialize)]
        struct Q {
            visa_status: Selection<VisaStatus>,
        }
        let any: Q = serde_json::from_str(r#"{"visa_status":"any"}"#).unwrap();
        assert_eq!(any.visa_status, Selection::Any);
        let specific: Q = serde_json::from_str(r#"{"visa_status":"citizen"}"#).unwrap();
        assert_eq!(specific.visa_status, Selection::Only(VisaStatus::Citizen));
    }

    #[test]
    fn bracket_bounds_cover_the_documented_ranges() {
        assert_eq!(ExperienceBracket::EntryLevel.bounds(), Some((0, Some(1))));
        assert_eq!(ExperienceBracket::EarlyCareer.bounds(), Some((2, Some(3))));
        assert_eq!(ExperienceBracket::MidLevel.bounds(), Some((4, Some(6))));
        assert_eq!(ExperienceBracket::Senior.bounds(), Some((7, None)));
        assert!(ExperienceBracket::Senior.contains(40));
        assert!(!ExperienceBracket::EntryLevel.contains(2));
    }

    #[test]
    fn bracket_excludes_unknown_experience() {
        let filter = ProfileFilter {
            experience: Some(ExperienceBracket::MidLevel),
            ..Default::default()
        };
        let p = profile("Carol", "Berlin", None, VisaStatus::Citizen);
        assert!(!filter.matches(&p));
    }

    #[test]
    fn skill_overlap_keeps_intersecting_rows() {
        let filter = ProfileFilter {
            skills: Some("SQL, Kubernetes".into()),
            ..Default::default()
        };
        let p = profile("Alice", "Stockholm", Some(3), VisaStatus::Citizen);
        assert!(filter.matches(&p));

        let disjoint = ProfileFilter {
            skills: Some("Kubernetes".into()),
            ..Default::default()
        };
        assert!(!disjoint.matches(&p));
    }

    #[test]
    fn search_ors_across_name_email_and_bio() {
        let mut p = profile("Alice", "Stockholm", Some(3), VisaStatus::Citizen);
        p.bio = Some("Distributed systems enthusiast".into());
        let by_bio = ProfileFilter {
            search: Some("DISTRIBUTED".into()),
            ..Default::default()
        };
        assert!(by_bio.matches(&p));
        let by_email = ProfileFilter {
            search: Some("alice@".into()),
            ..Default::default()
        };
        assert!(by_email.matches(&p));
        let miss = ProfileFilter {
            search: Some("golang".into()),
            ..Default::default()
        };
        assert!(!miss.matches(&p));
    }

    #[test]
    fn filters_commute() {
        let a = ProfileFilter {
            location: Some("stock".into()),
            skills: Some("Rust".into()),
            ..Default::default()
        };
        let b = ProfileFilter {
            skills: Some("Rust".into()),
            location: Some("stock".into()),
            ..Default::default()
        };
        let candidates = vec![
            profile("Alice", "Stockholm", Some(5), VisaStatus::Citizen),
            profile("Bob", "Oslo", Some(1), VisaStatus::WorkPermit),
            profile("Carol", "Stockholm", None, VisaStatus::PermanentResident),
        ];
        let left: Vec<&str> = candidates
            .iter()
            .filter(|p| a.matches(p))
            .map(|p| p.name.as_str())
            .collect();
        let right: Vec<&str> = candidates
            .iter()
            .filter(|p| b.matches(p))
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(left, right);
    }

    #[test]
    fn profile_clause_placeholders_are_sequential() {
        let filter = ProfileFilter {
            search: Some("rust".into()),
            experience: Some(ExperienceBracket::EarlyCareer),
            location: Some("berlin".into()),
            skills: Some("Rust,SQL".into()),
            visa_status: Some(Selection::Only(VisaStatus::Citizen)),
            availability: Some(Selection::Only(Availability::TwoWeeks)),
            ..Default::default()
        };
        let (clauses, binds) = filter.sql_clauses(1);
        assert_eq!(clauses.len(), 6);
        assert_eq!(binds.len(), 7);
        assert_eq!(
            clauses[0],
            "(name ILIKE $1 OR email ILIKE $1 OR bio ILIKE $1)"
        );
        assert_eq!(clauses[1], "experience_years BETWEEN $2 AND $3");
        assert_eq!(clauses[3], "skills && $5");
        assert_eq!(binds[0], BindValue::Text("%rust%".into()));
        assert_eq!(
            binds[4],
            BindValue::TextArray(vec!["Rust".into(), "SQL".into()])
        );
    }

    #[test]
    fn job_filter_matches_by_type_and_search() {
        use crate::models::job::{ExperienceLevel, JobPosting, JobType};
        let job = JobPosting {
            id: uuid::Uuid::new_v4(),
            title: "Senior Rust Engineer".into(),
            location: "Remote".into(),
            job_type: JobType::Contract,
            experience_level: ExperienceLevel::Senior,
            required_skills: vec![],
            preferred_skills: None,
            experience_required: None,
            description: Some("Build storage plumbing".into()),
            created_at: None,
            updated_at: None,
        };
        let filter = JobFilter {
            search: Some("storage".into()),
            job_type: Some(Selection::Only(JobType::Contract)),
            ..Default::default()
        };
        assert!(filter.matches(&job));

        let wrong_type = JobFilter {
            job_type: Some(Selection::Only(JobType::Internship)),
            ..Default::default()
        };
        assert!(!wrong_type.matches(&job));
    }
}
