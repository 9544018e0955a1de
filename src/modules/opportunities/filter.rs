use itertools::Itertools;
use std::collections::BTreeSet;

use super::model::{CompanySize, DurationBucket, Posting, PostedWithin, StipendRange, WorkMode};

/// The narrowing request a student builds up while browsing.
///
/// Categories are ANDed together. Inside a set-valued category a posting
/// passes if it matches any member, and an empty set places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub work_modes: BTreeSet<WorkMode>,
    pub durations: BTreeSet<DurationBucket>,
    pub stipend: StipendRange,
    pub skills: BTreeSet<String>,
    pub company_sizes: BTreeSet<CompanySize>,
    pub posted_within: PostedWithin,
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T, checked: bool) {
    if checked {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every criterion, search text included
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_work_mode(&mut self, mode: WorkMode, checked: bool) {
        toggle(&mut self.work_modes, mode, checked);
    }

    pub fn set_duration(&mut self, bucket: DurationBucket, checked: bool) {
        toggle(&mut self.durations, bucket, checked);
    }

    pub fn set_skill(&mut self, skill: impl Into<String>, checked: bool) {
        toggle(&mut self.skills, skill.into(), checked);
    }

    pub fn set_company_size(&mut self, size: CompanySize, checked: bool) {
        toggle(&mut self.company_sizes, size, checked);
    }

    /// Number of active filters shown on the filter badge. Search text does not count.
    pub fn active_filter_count(&self) -> usize {
        self.work_modes.len()
            + self.durations.len()
            + self.skills.len()
            + self.company_sizes.len()
            + usize::from(self.posted_within != PostedWithin::AllTime)
            + usize::from(!self.stipend.is_unbounded())
    }

    /// True if `posting` passes every active criterion
    pub fn matches(&self, posting: &Posting) -> bool {
        self.matches_search(posting)
            && (self.work_modes.is_empty() || self.work_modes.contains(&posting.work_mode))
            && (self.durations.is_empty()
                || self
                    .durations
                    .iter()
                    .any(|bucket| bucket.contains(posting.duration_months)))
            && self.stipend.contains(posting.stipend)
            && (self.skills.is_empty() || self.skills.iter().any(|skill| posting.has_skill(skill)))
            && (self.company_sizes.is_empty()
                || self.company_sizes.contains(&posting.company_size))
            && self.posted_within.admits(posting.posted_days_ago)
    }

    fn matches_search(&self, posting: &Posting) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let query = self.search.to_lowercase();

        posting.title.to_lowercase().contains(&query)
            || posting.organization.to_lowercase().contains(&query)
            || posting.location.to_lowercase().contains(&query)
            || posting
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&query))
    }
}

/// Narrow `postings` to those matching `criteria`, keeping their order
pub fn apply_filters<'a>(postings: &'a [Posting], criteria: &FilterCriteria) -> Vec<&'a Posting> {
    postings
        .iter()
        .filter(|posting| criteria.matches(posting))
        .collect()
}

/// Every distinct skill across `postings`, sorted
pub fn skill_catalog(postings: &[Posting]) -> Vec<String> {
    postings
        .iter()
        .flat_map(|posting| posting.skills.iter())
        .unique()
        .sorted()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(
        title: &str,
        organization: &str,
        location: &str,
        work_mode: WorkMode,
        stipend: u32,
        duration_months: u32,
        skills: &[&str],
        company_size: CompanySize,
        posted_days_ago: u32,
    ) -> Posting {
        Posting {
            title: title.to_string(),
            organization: organization.to_string(),
            location: location.to_string(),
            work_mode,
            stipend,
            duration_months,
            description: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            company_size,
            posted_days_ago,
        }
    }

    fn sample_postings() -> Vec<Posting> {
        vec![
            posting(
                "Frontend Developer Intern",
                "TechCorp Solutions",
                "San Francisco, CA",
                WorkMode::Onsite,
                2000,
                3,
                &["React", "TypeScript", "Git"],
                CompanySize::Large,
                2,
            ),
            posting(
                "Data Science Intern",
                "Analytics Pro",
                "Remote",
                WorkMode::Remote,
                1800,
                4,
                &["Python", "SQL"],
                CompanySize::Medium,
                7,
            ),
            posting(
                "Mobile App Developer Intern",
                "AppStudio",
                "Los Angeles, CA",
                WorkMode::Hybrid,
                2200,
                8,
                &["React Native", "Swift"],
                CompanySize::Small,
                12,
            ),
        ]
    }

    fn titles<'a>(postings: &[&'a Posting]) -> Vec<&'a str> {
        postings.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_keeps_everything_in_order() {
        let postings = sample_postings();
        let result = apply_filters(&postings, &FilterCriteria::new());
        assert_eq!(result.len(), postings.len());
        assert!(result.iter().zip(postings.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_skill_filter_is_exact() {
        let postings = sample_postings();
        let mut criteria = FilterCriteria::new();
        criteria.set_skill("React", true);

        // "React Native" is a different skill
        assert_eq!(
            titles(&apply_filters(&postings, &criteria)),
            vec!["Frontend Developer Intern"]
        );

        criteria.set_skill("Python", true);
        assert_eq!(
            titles(&apply_filters(&postings, &criteria)),
            vec!["Frontend Developer Intern", "Data Science Intern"]
        );
    }

    #[test]
    fn test_search_matches_any_text_field() {
        let postings = sample_postings();
        let mut criteria = FilterCriteria::new();

        criteria.search = "REACT".to_string();
        assert_eq!(
            titles(&apply_filters(&postings, &criteria)),
            vec!["Frontend Developer Intern", "Mobile App Developer Intern"]
        );

        criteria.search = "analytics".to_string();
        assert_eq!(
            titles(&apply_filters(&postings, &criteria)),
            vec!["Data Science Intern"]
        );

        criteria.search = "remote".to_string();
        assert_eq!(
            titles(&apply_filters(&postings, &criteria)),
            vec!["Data Science Intern"]
        );

        // The query is matched as typed, surrounding spaces included
        criteria.search = " remote ".to_string();
        assert!(apply_filters(&postings, &criteria).is_empty());
        criteria.search = "   ".to_string();
        assert!(apply_filters(&postings, &criteria).is_empty());

        criteria.search = String::new();
        assert_eq!(apply_filters(&postings, &criteria).len(), 3);

        criteria.search = "blockchain".to_string();
        assert!(apply_filters(&postings, &criteria).is_empty());
    }

    #[test]
    fn test_categories_are_anded() {
        let postings = sample_postings();
        let mut criteria = FilterCriteria::new();
        criteria.set_work_mode(WorkMode::Onsite, true);
        criteria.set_work_mode(WorkMode::Remote, true);
        assert_eq!(apply_filters(&postings, &criteria).len(), 2);

        criteria.set_duration(DurationBucket::FourToSix, true);
        assert_eq!(
            titles(&apply_filters(&postings, &criteria)),
            vec!["Data Science Intern"]
        );

        criteria.set_company_size(CompanySize::Large, true);
        assert!(apply_filters(&postings, &criteria).is_empty());
    }

    #[test]
    fn test_stipend_and_recency_bounds() {
        let postings = sample_postings();
        let mut criteria = FilterCriteria::new();

        criteria.stipend = StipendRange::new(2000, 2500);
        assert_eq!(
            titles(&apply_filters(&postings, &criteria)),
            vec!["Frontend Developer Intern", "Mobile App Developer Intern"]
        );

        criteria.posted_within = PostedWithin::Days(7);
        assert_eq!(
            titles(&apply_filters(&postings, &criteria)),
            vec!["Frontend Developer Intern"]
        );

        criteria.stipend = StipendRange::default();
        assert_eq!(
            titles(&apply_filters(&postings, &criteria)),
            vec!["Frontend Developer Intern", "Data Science Intern"]
        );
    }

    #[test]
    fn test_toggle_count_and_clear() {
        let mut criteria = FilterCriteria::new();
        assert_eq!(criteria.active_filter_count(), 0);

        criteria.set_work_mode(WorkMode::Hybrid, true);
        criteria.set_work_mode(WorkMode::Hybrid, true);
        criteria.set_skill("Git", true);
        criteria.set_company_size(CompanySize::Small, true);
        criteria.posted_within = PostedWithin::Days(3);
        criteria.stipend = StipendRange::new(1000, 5000);
        criteria.search = "intern".to_string();
        assert_eq!(criteria.active_filter_count(), 5);

        criteria.set_work_mode(WorkMode::Hybrid, false);
        criteria.set_skill("Git", false);
        assert_eq!(criteria.active_filter_count(), 3);

        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
        assert!(criteria.search.is_empty());
    }

    #[test]
    fn test_skill_catalog_sorted_and_unique() {
        let mut postings = sample_postings();
        postings[1].skills.push("Git".to_string());
        assert_eq!(
            skill_catalog(&postings),
            vec!["Git", "Python", "React", "React Native", "SQL", "Swift", "TypeScript"]
        );
    }
}
