use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::modules::utils::time::format_days_ago;

/// Where the intern works
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Remote,
    Onsite,
    Hybrid,
}

impl WorkMode {
    pub const ALL: [WorkMode; 3] = [WorkMode::Remote, WorkMode::Onsite, WorkMode::Hybrid];

    /// Short name accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            WorkMode::Remote => "remote",
            WorkMode::Onsite => "onsite",
            WorkMode::Hybrid => "hybrid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkMode::Remote => "Remote",
            WorkMode::Onsite => "On-site",
            WorkMode::Hybrid => "Hybrid",
        }
    }
}

impl FromStr for WorkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(WorkMode::Remote),
            "onsite" | "on-site" => Ok(WorkMode::Onsite),
            "hybrid" => Ok(WorkMode::Hybrid),
            other => Err(format!("Unknown work mode '{}'", other)),
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Size bucket of the hiring organization
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Small,  // Startup (1-50)
    Medium, // 51-500
    Large,  // 500+
}

impl CompanySize {
    pub const ALL: [CompanySize; 3] = [CompanySize::Small, CompanySize::Medium, CompanySize::Large];

    pub fn key(&self) -> &'static str {
        match self {
            CompanySize::Small => "small",
            CompanySize::Medium => "medium",
            CompanySize::Large => "large",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompanySize::Small => "Startup (1-50)",
            CompanySize::Medium => "Medium (51-500)",
            CompanySize::Large => "Large (500+)",
        }
    }
}

impl FromStr for CompanySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "startup" => Ok(CompanySize::Small),
            "medium" => Ok(CompanySize::Medium),
            "large" => Ok(CompanySize::Large),
            other => Err(format!("Unknown company size '{}'", other)),
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Duration bucket a posting can fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DurationBucket {
    UpToThree, // 1-3 months
    FourToSix, // 4-6 months
    OverSix,   // more than 6 months
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 3] = [
        DurationBucket::UpToThree,
        DurationBucket::FourToSix,
        DurationBucket::OverSix,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DurationBucket::UpToThree => "1-3",
            DurationBucket::FourToSix => "4-6",
            DurationBucket::OverSix => "6+",
        }
    }

    pub fn contains(&self, months: u32) -> bool {
        match self {
            DurationBucket::UpToThree => months <= 3,
            DurationBucket::FourToSix => (4..=6).contains(&months),
            DurationBucket::OverSix => months > 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationBucket::UpToThree => "1-3 months",
            DurationBucket::FourToSix => "4-6 months",
            DurationBucket::OverSix => "6+ months",
        }
    }
}

impl FromStr for DurationBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1-3" => Ok(DurationBucket::UpToThree),
            "4-6" => Ok(DurationBucket::FourToSix),
            "6+" => Ok(DurationBucket::OverSix),
            other => Err(format!(
                "Unknown duration '{}'. Expected 1-3, 4-6 or 6+",
                other
            )),
        }
    }
}

/// Recency bound on a posting's age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostedWithin {
    #[default]
    AllTime,
    Days(u32),
}

impl PostedWithin {
    pub fn admits(&self, days_ago: u32) -> bool {
        match self {
            PostedWithin::AllTime => true,
            PostedWithin::Days(limit) => days_ago <= *limit,
        }
    }
}

impl FromStr for PostedWithin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(PostedWithin::AllTime);
        }
        value
            .parse::<u32>()
            .map(PostedWithin::Days)
            .map_err(|_| format!("Expected 'all' or a number of days, got '{}'", value))
    }
}

/// Inclusive stipend bounds. The default admits every amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StipendRange {
    pub min: u32,
    pub max: u32,
}

impl StipendRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, amount: u32) -> bool {
        self.min <= amount && amount <= self.max
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for StipendRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: u32::MAX,
        }
    }
}

/// A read-only internship listing
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub title: String,
    pub organization: String,
    pub location: String,
    pub work_mode: WorkMode,
    pub stipend: u32, // per month
    pub duration_months: u32,
    pub description: String,
    pub skills: Vec<String>,
    pub company_size: CompanySize,
    pub posted_days_ago: u32,
}

impl Posting {
    pub fn stipend_label(&self) -> String {
        format!("${}/month", group_thousands(self.stipend))
    }

    pub fn duration_label(&self) -> String {
        if self.duration_months == 1 {
            "1 month".to_string()
        } else {
            format!("{} months", self.duration_months)
        }
    }

    pub fn posted_label(&self) -> String {
        format_days_ago(self.posted_days_ago)
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_buckets() {
        assert!(DurationBucket::UpToThree.contains(1));
        assert!(DurationBucket::UpToThree.contains(3));
        assert!(!DurationBucket::UpToThree.contains(4));
        assert!(DurationBucket::FourToSix.contains(4));
        assert!(DurationBucket::FourToSix.contains(6));
        assert!(!DurationBucket::OverSix.contains(6));
        assert!(DurationBucket::OverSix.contains(7));
    }

    #[test]
    fn test_option_values_parse() {
        assert_eq!("onsite".parse::<WorkMode>().unwrap(), WorkMode::Onsite);
        assert_eq!("On-site".parse::<WorkMode>().unwrap(), WorkMode::Onsite);
        assert!("office".parse::<WorkMode>().is_err());

        assert_eq!("6+".parse::<DurationBucket>().unwrap(), DurationBucket::OverSix);
        assert!("7-9".parse::<DurationBucket>().is_err());

        assert_eq!("small".parse::<CompanySize>().unwrap(), CompanySize::Small);
        assert!("huge".parse::<CompanySize>().is_err());

        assert_eq!("all".parse::<PostedWithin>().unwrap(), PostedWithin::AllTime);
        assert_eq!("7".parse::<PostedWithin>().unwrap(), PostedWithin::Days(7));
        assert!("week".parse::<PostedWithin>().is_err());
    }

    #[test]
    fn test_command_line_keys_parse_back() {
        for mode in WorkMode::ALL {
            assert_eq!(mode.key().parse::<WorkMode>(), Ok(mode));
        }
        for bucket in DurationBucket::ALL {
            assert_eq!(bucket.key().parse::<DurationBucket>(), Ok(bucket));
        }
        for size in CompanySize::ALL {
            assert_eq!(size.key().parse::<CompanySize>(), Ok(size));
        }
    }

    #[test]
    fn test_posted_within_is_inclusive() {
        assert!(PostedWithin::Days(7).admits(7));
        assert!(!PostedWithin::Days(7).admits(8));
        assert!(PostedWithin::AllTime.admits(365));
    }

    #[test]
    fn test_stipend_range() {
        let range = StipendRange::new(2000, 2500);
        assert!(range.contains(2000));
        assert!(range.contains(2500));
        assert!(!range.contains(1999));
        assert!(!range.is_unbounded());
        assert!(StipendRange::default().contains(u32::MAX));
    }

    #[test]
    fn test_labels() {
        let posting = Posting {
            title: "DevOps Intern".to_string(),
            organization: "CloudTech".to_string(),
            location: "Seattle, WA".to_string(),
            work_mode: WorkMode::Hybrid,
            stipend: 2400,
            duration_months: 6,
            description: String::new(),
            skills: vec!["Docker".to_string()],
            company_size: CompanySize::Large,
            posted_days_ago: 4,
        };
        assert_eq!(posting.stipend_label(), "$2,400/month");
        assert_eq!(posting.duration_label(), "6 months");
        assert_eq!(posting.posted_label(), "4 days ago");
        assert!(posting.has_skill("Docker"));
        assert!(!posting.has_skill("docker"));
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
