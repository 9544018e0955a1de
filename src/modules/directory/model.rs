use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::password::Credential;

/// The three kinds of portal users
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Company,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Company, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Company => "company",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "company" => Ok(Role::Company),
            "admin" => Ok(Role::Admin),
            other => Err(format!(
                "Unknown role '{}'. Expected student, company or admin",
                other
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Role-specific profile data. The variant *is* the account's role.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Student(StudentProfile),
    Company(CompanyProfile),
    Admin(AdminProfile),
}

/// Returned when a profile patch targets a different role than the account has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleMismatch {
    pub expected: Role,
    pub found: Role,
}

fn merge_field(target: &mut Option<String>, patch: Option<String>) {
    if patch.is_some() {
        *target = patch;
    }
}

impl Profile {
    /// An empty profile for the given role
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Student => Profile::Student(StudentProfile::default()),
            Role::Company => Profile::Company(CompanyProfile::default()),
            Role::Admin => Profile::Admin(AdminProfile::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Profile::Student(_) => Role::Student,
            Profile::Company(_) => Role::Company,
            Profile::Admin(_) => Role::Admin,
        }
    }

    /// Merge the fields set in `patch` into this profile, leaving the rest untouched
    pub fn merge(&mut self, patch: Profile) -> Result<(), RoleMismatch> {
        match (self, patch) {
            (Profile::Student(current), Profile::Student(patch)) => {
                merge_field(&mut current.university, patch.university);
                merge_field(&mut current.major, patch.major);
                merge_field(&mut current.year, patch.year);
                merge_field(&mut current.gpa, patch.gpa);
                Ok(())
            }
            (Profile::Company(current), Profile::Company(patch)) => {
                merge_field(&mut current.company_name, patch.company_name);
                merge_field(&mut current.position, patch.position);
                merge_field(&mut current.company_size, patch.company_size);
                Ok(())
            }
            (Profile::Admin(current), Profile::Admin(patch)) => {
                merge_field(&mut current.institution, patch.institution);
                merge_field(&mut current.department, patch.department);
                Ok(())
            }
            (current, patch) => Err(RoleMismatch {
                expected: current.role(),
                found: patch.role(),
            }),
        }
    }

    /// One-line summary for listings
    pub fn summary(&self) -> String {
        let parts: Vec<&str> = match self {
            Profile::Student(p) => [
                p.university.as_deref(),
                p.major.as_deref(),
                p.year.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Profile::Company(p) => [
                p.company_name.as_deref(),
                p.position.as_deref(),
                p.company_size.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Profile::Admin(p) => [p.institution.as_deref(), p.department.as_deref()]
                .into_iter()
                .flatten()
                .collect(),
        };
        parts.join(", ")
    }
}

/// A registered portal user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String, // Unique, compared case-insensitively
    pub credential: Credential,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Case-insensitive comparison against the account's natural key
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.trim().to_lowercase()
    }
}

/// Input for registering a new account; the profile variant selects the role
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile: Profile,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            profile: Profile::empty(role),
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }
}

/// Partial update for an account; `None` fields are left as they are
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile: Option<Profile>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.profile.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!(" Company ".parse::<Role>().unwrap(), Role::Company);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("recruiter".parse::<Role>().is_err());
        assert_eq!(Role::Company.to_string(), "company");
    }

    #[test]
    fn test_profile_serializes_with_role_tag() {
        let profile = Profile::Student(StudentProfile {
            university: Some("Tech University".to_string()),
            gpa: Some("3.8".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role"], "student");
        assert_eq!(json["university"], "Tech University");
        assert!(json.get("major").is_none());

        let company: Profile =
            serde_json::from_str(r#"{"role":"company","companyName":"StartupTech"}"#).unwrap();
        assert_eq!(company.role(), Role::Company);
        match company {
            Profile::Company(p) => assert_eq!(p.company_name.as_deref(), Some("StartupTech")),
            other => panic!("unexpected profile {:?}", other),
        }
    }

    #[test]
    fn test_profile_merge_keeps_unset_fields() {
        let mut profile = Profile::Student(StudentProfile {
            university: Some("Tech University".to_string()),
            major: Some("Computer Science".to_string()),
            year: Some("3rd Year".to_string()),
            gpa: Some("3.8".to_string()),
        });

        profile
            .merge(Profile::Student(StudentProfile {
                gpa: Some("3.95".to_string()),
                ..Default::default()
            }))
            .unwrap();

        match &profile {
            Profile::Student(p) => {
                assert_eq!(p.gpa.as_deref(), Some("3.95"));
                assert_eq!(p.university.as_deref(), Some("Tech University"));
                assert_eq!(p.major.as_deref(), Some("Computer Science"));
                assert_eq!(p.year.as_deref(), Some("3rd Year"));
            }
            other => panic!("unexpected profile {:?}", other),
        }
    }

    #[test]
    fn test_profile_merge_rejects_other_role() {
        let mut profile = Profile::empty(Role::Student);
        let err = profile.merge(Profile::empty(Role::Admin)).unwrap_err();
        assert_eq!(err.expected, Role::Student);
        assert_eq!(err.found, Role::Admin);
        assert_eq!(profile, Profile::empty(Role::Student));
    }

    #[test]
    fn test_profile_summary() {
        let profile = Profile::Admin(AdminProfile {
            institution: Some("State College".to_string()),
            department: Some("Placement Office".to_string()),
        });
        assert_eq!(profile.summary(), "State College, Placement Office");
        assert_eq!(Profile::empty(Role::Company).summary(), "");
    }
}
