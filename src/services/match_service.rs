use crate::models::job::JobPosting;
use serde::{Deserialize, Serialize};

/// Compatibility report for one (candidate, job) pair. Computed on demand,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub missing_required_skills: Vec<String>,
    pub missing_preferred_skills: Vec<String>,
    pub has_experience_gap: bool,
    pub experience_gap: i32,
    pub match_percentage: i32,
    pub has_gaps: bool,
    pub can_apply: bool,
}

impl MatchResult {
    fn empty() -> Self {
        Self {
            missing_required_skills: Vec::new(),
            missing_preferred_skills: Vec::new(),
            has_experience_gap: false,
            experience_gap: 0,
            match_percentage: 0,
            has_gaps: false,
            can_apply: false,
        }
    }
}

pub struct MatchService;

impl MatchService {
    /// Score a candidate against a job posting.
    ///
    /// Skill satisfaction is bidirectional case-insensitive substring
    /// containment: "JavaScript Developer" satisfies "JavaScript" and the
    /// other way around. The looseness (short tokens can collide, e.g. "Go"
    /// inside "Django") is a known imprecision of the matching rule, kept
    /// as-is.
    ///
    /// The percentage is the average of a skill sub-score and an experience
    /// sub-score, each in [0, 100], rounded once at the end.
    pub fn compute(
        job: Option<&JobPosting>,
        candidate_skills: &[String],
        candidate_experience: i32,
    ) -> MatchResult {
        let Some(job) = job else {
            return MatchResult::empty();
        };

        let candidate_lower: Vec<String> = candidate_skills
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        let missing_required_skills: Vec<String> = job
            .required_skills
            .iter()
            .filter(|req| !skill_satisfied(req, &candidate_lower))
            .cloned()
            .collect();

        let missing_preferred_skills: Vec<String> = job
            .preferred_skills
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .filter(|pref| !job.required_skills.contains(*pref))
            .filter(|pref| !skill_satisfied(pref, &candidate_lower))
            .cloned()
            .collect();

        let experience_gap = match job.experience_required {
            Some(required) => (required - candidate_experience).max(0),
            None => 0,
        };
        let has_experience_gap = experience_gap > 0;

        let total_required = job.required_skills.len();
        let skill_score = if total_required == 0 {
            100.0
        } else {
            let satisfied = total_required - missing_required_skills.len();
            100.0 * satisfied as f64 / total_required as f64
        };

        let experience_score = match job.experience_required {
            None | Some(0) => 100.0,
            Some(required) => {
                (100.0 * candidate_experience as f64 / required as f64).min(100.0)
            }
        };

        // Round once, after averaging. Rounding the sub-scores first gives
        // a different result on some inputs.
        let match_percentage = ((skill_score + experience_score) / 2.0).round() as i32;

        let has_gaps = !missing_required_skills.is_empty() || has_experience_gap;
        let can_apply = missing_required_skills.is_empty() && !has_experience_gap;

        MatchResult {
            missing_required_skills,
            missing_preferred_skills,
            has_experience_gap,
            experience_gap,
            match_percentage,
            has_gaps,
            can_apply,
        }
    }

    /// Annotate jobs with their match result and order them best-first.
    /// Stable sort, so equal percentages keep the source ordering.
    pub fn rank_jobs(
        jobs: Vec<JobPosting>,
        candidate_skills: &[String],
        candidate_experience: i32,
    ) -> Vec<(JobPosting, MatchResult)> {
        let mut ranked: Vec<(JobPosting, MatchResult)> = jobs
            .into_iter()
            .map(|job| {
                let result = Self::compute(Some(&job), candidate_skills, candidate_experience);
                (job, result)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.match_percentage.cmp(&a.1.match_percentage));
        ranked
    }
}

fn skill_satisfied(requirement: &str, candidate_lower: &[String]) -> bool {
    let req = requirement.to_lowercase();
    candidate_lower
        .iter()
        .any(|have| have.contains(&req) || req.contains(have))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{ExperienceLevel, JobType};

    fn job(
        required: &[&str],
        preferred: Option<&[&str]>,
        experience_required: Option<i32>,
    ) -> JobPosting {
        JobPosting {
            id: uuid::Uuid::new_v4(),
            title: "Backend Engineer".into(),
            location: "Stockholm".into(),
            job_type: JobType::FullTime,
            experience_level: ExperienceLevel::Mid,
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.map(|p| p.iter().map(|s| s.to_string()).collect()),
            experience_required,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn absent_job_yields_zero_result() {
        let result = MatchService::compute(None, &skills(&["Rust", "SQL"]), 10);
        assert_eq!(result, MatchResult::empty());
        assert_eq!(result.match_percentage, 0);
        assert!(!result.can_apply);
        assert!(!result.has_gaps);
    }

    #[test]
    fn no_requirements_is_full_match_even_for_empty_candidate() {
        let j = job(&[], None, None);
        let result = MatchService::compute(Some(&j), &[], 0);
        assert_eq!(result.match_percentage, 100);
        assert!(result.can_apply);
        assert!(!result.has_gaps);
    }

    #[test]
    fn substring_containment_is_bidirectional_and_case_insensitive() {
        let j = job(&["JavaScript"], None, None);
        let broad = MatchService::compute(Some(&j), &skills(&["javascript developer"]), 0);
        assert!(broad.missing_required_skills.is_empty());

        let j2 = job(&["JavaScript Developer"], None, None);
        let narrow = MatchService::compute(Some(&j2), &skills(&["JAVASCRIPT"]), 0);
        assert!(narrow.missing_required_skills.is_empty());
    }

    #[test]
    fn scenario_python_sql_docker() {
        let j = job(&["Python", "SQL"], Some(&["Docker"]), Some(3));
        let result = MatchService::compute(Some(&j), &skills(&["python", "Java"]), 1);

        assert_eq!(result.missing_required_skills, vec!["SQL".to_string()]);
        assert_eq!(result.missing_preferred_skills, vec!["Docker".to_string()]);
        assert!(result.has_experience_gap);
        assert_eq!(result.experience_gap, 2);
        // (50 + 33.33) / 2 = 41.67, rounded once at the end
        assert_eq!(result.match_percentage, 42);
        assert!(result.has_gaps);
        assert!(!result.can_apply);
    }

    #[test]
    fn experience_exactly_met_has_no_gap() {
        let j = job(&[], None, Some(5));
        let result = MatchService::compute(Some(&j), &[], 5);
        assert!(!result.has_experience_gap);
        assert_eq!(result.experience_gap, 0);
        assert_eq!(result.match_percentage, 100);
        assert!(result.can_apply);
    }

    #[test]
    fn preferred_skills_never_block_apply() {
        let j = job(&["Rust"], Some(&["Kubernetes", "Terraform"]), None);
        let result = MatchService::compute(Some(&j), &skills(&["rust"]), 0);
        assert_eq!(result.missing_preferred_skills.len(), 2);
        assert!(result.can_apply);
        assert!(!result.has_gaps);
    }

    #[test]
    fn preferred_duplicating_required_reported_once() {
        let j = job(&["Docker"], Some(&["Docker", "Helm"]), None);
        let result = MatchService::compute(Some(&j), &[], 0);
        assert_eq!(result.missing_required_skills, vec!["Docker".to_string()]);
        // "Docker" appears verbatim in required_skills, so only "Helm" remains
        assert_eq!(result.missing_preferred_skills, vec!["Helm".to_string()]);
    }

    #[test]
    fn adding_matching_skill_removes_exactly_that_gap() {
        let j = job(&["Python", "SQL"], None, None);
        let before = MatchService::compute(Some(&j), &skills(&["Python"]), 0);
        assert_eq!(before.missing_required_skills, vec!["SQL".to_string()]);

        let after = MatchService::compute(Some(&j), &skills(&["Python", "PostgreSQL"]), 0);
        assert!(after.missing_required_skills.is_empty());
        assert!(after.match_percentage >= before.match_percentage);
    }

    #[test]
    fn missing_required_preserves_requirement_order() {
        let j = job(&["Zig", "Ada", "COBOL"], None, None);
        let result = MatchService::compute(Some(&j), &skills(&["Fortran"]), 0);
        assert_eq!(
            result.missing_required_skills,
            vec!["Zig".to_string(), "Ada".to_string(), "COBOL".to_string()]
        );
    }

    #[test]
    fn compute_is_idempotent() {
        let j = job(&["Rust", "SQL"], Some(&["Docker"]), Some(4));
        let first = MatchService::compute(Some(&j), &skills(&["rust"]), 2);
        let second = MatchService::compute(Some(&j), &skills(&["rust"]), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn experience_score_is_clamped_at_100() {
        let j = job(&[], None, Some(2));
        let result = MatchService::compute(Some(&j), &[], 20);
        assert_eq!(result.match_percentage, 100);
    }

    #[test]
    fn rank_jobs_orders_best_first() {
        let strong = job(&["Rust"], None, None);
        let weak = job(&["Haskell", "OCaml"], None, Some(10));
        let ranked = MatchService::rank_jobs(vec![weak, strong], &skills(&["Rust"]), 1);
        assert_eq!(ranked[0].0.required_skills, vec!["Rust".to_string()]);
        assert!(ranked[0].1.match_percentage > ranked[1].1.match_percentage);
    }
}
