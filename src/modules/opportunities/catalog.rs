use lazy_static::lazy_static;
use std::fs;
use std::path::Path;

use super::model::{CompanySize, Posting, WorkMode};
use crate::modules::storage::StorageError;

// (title, organization, location, mode, stipend, months, description, skills, size, days ago)
type PostingRow = (
    &'static str,
    &'static str,
    &'static str,
    WorkMode,
    u32,
    u32,
    &'static str,
    &'static [&'static str],
    CompanySize,
    u32,
);

const DEMO_ROWS: [PostingRow; 8] = [
    (
        "Frontend Developer Intern",
        "TechCorp Solutions",
        "San Francisco, CA",
        WorkMode::Onsite,
        2000,
        3,
        "Work on cutting-edge web applications using React, TypeScript, and modern development tools. You'll be part of a dynamic team building user interfaces for enterprise clients.",
        &["React", "TypeScript", "Tailwind CSS", "Git", "REST APIs"],
        CompanySize::Large,
        2,
    ),
    (
        "Data Science Intern",
        "Analytics Pro",
        "Remote",
        WorkMode::Remote,
        1800,
        4,
        "Dive into machine learning and data analysis projects. Work with large datasets and help build predictive models for business intelligence.",
        &["Python", "Machine Learning", "SQL", "Pandas", "Tableau"],
        CompanySize::Medium,
        7,
    ),
    (
        "Marketing Intern",
        "Brand Builders",
        "New York, NY",
        WorkMode::Hybrid,
        1500,
        6,
        "Support digital marketing campaigns and content creation. Learn about social media strategy, content marketing, and brand development.",
        &["Social Media", "Content Creation", "Analytics", "Photoshop"],
        CompanySize::Medium,
        3,
    ),
    (
        "Backend Developer Intern",
        "ServerWorks",
        "Austin, TX",
        WorkMode::Onsite,
        2200,
        4,
        "Build robust server-side applications and APIs. Work with cloud technologies and distributed systems to support millions of users.",
        &["Node.js", "Python", "Docker", "AWS", "MongoDB"],
        CompanySize::Large,
        1,
    ),
    (
        "UX Design Intern",
        "DesignHub",
        "Remote",
        WorkMode::Remote,
        1600,
        3,
        "Create intuitive user experiences for mobile and web applications. Conduct user research and design prototypes.",
        &["Figma", "Adobe XD", "User Research", "Prototyping", "Wireframing"],
        CompanySize::Small,
        5,
    ),
    (
        "DevOps Intern",
        "CloudTech",
        "Seattle, WA",
        WorkMode::Hybrid,
        2400,
        6,
        "Automate deployment pipelines and manage cloud infrastructure. Learn about containerization and CI/CD best practices.",
        &["Docker", "Kubernetes", "Jenkins", "AWS", "Terraform"],
        CompanySize::Large,
        4,
    ),
    (
        "Mobile App Developer Intern",
        "AppStudio",
        "Los Angeles, CA",
        WorkMode::Hybrid,
        1900,
        5,
        "Develop native mobile applications for iOS and Android. Work on user-facing features and app optimization.",
        &["React Native", "Swift", "Kotlin", "Firebase", "REST APIs"],
        CompanySize::Medium,
        6,
    ),
    (
        "Cybersecurity Intern",
        "SecureNet",
        "Washington, DC",
        WorkMode::Onsite,
        2100,
        4,
        "Assist in threat analysis and security audits. Learn about network security and vulnerability assessment.",
        &["Network Security", "Penetration Testing", "Python", "Linux", "SIEM"],
        CompanySize::Large,
        7,
    ),
];

lazy_static! {
    static ref DEMO_POSTINGS: Vec<Posting> = DEMO_ROWS
        .iter()
        .map(
            |&(title, organization, location, work_mode, stipend, months, description, skills, size, days)| {
                Posting {
                    title: title.to_string(),
                    organization: organization.to_string(),
                    location: location.to_string(),
                    work_mode,
                    stipend,
                    duration_months: months,
                    description: description.to_string(),
                    skills: skills.iter().map(|s| s.to_string()).collect(),
                    company_size: size,
                    posted_days_ago: days,
                }
            },
        )
        .collect();
}

/// The fixed posting corpus shown on the student dashboard
pub fn demo_postings() -> &'static [Posting] {
    &DEMO_POSTINGS
}

/// Function to load a posting corpus from a JSON array on disk
pub fn load_postings(path: &Path) -> Result<Vec<Posting>, StorageError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)))
}
