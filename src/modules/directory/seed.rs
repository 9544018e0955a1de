use chrono::{DateTime, Utc};

use super::model::{Account, AdminProfile, CompanyProfile, Profile, StudentProfile};
use super::password::Credential;

// (id, name, email, password, university, major, year, gpa)
const STUDENTS: [(&str, &str, &str, &str, &str, &str, &str, &str); 6] = [
    ("1", "Priya Sharma", "priya.sharma@university.edu", "priya2024", "Tech University", "Computer Science", "3rd Year", "3.8"),
    ("2", "Marcus Thompson", "marcus.t@university.edu", "marcus123", "State College", "Software Engineering", "4th Year", "3.7"),
    ("3", "Mei Lin Wang", "meilin.wang@university.edu", "meilin2024", "Tech University", "Data Science", "2nd Year", "3.9"),
    ("4", "Ahmed Hassan", "ahmed.hassan@university.edu", "ahmed123", "Engineering College", "Information Technology", "3rd Year", "3.6"),
    ("5", "Sofia Rodriguez", "sofia.rodriguez@university.edu", "sofia2024", "State College", "Cybersecurity", "4th Year", "3.8"),
    ("6", "Kwame Asante", "kwame.asante@university.edu", "kwame123", "Tech University", "Artificial Intelligence", "2nd Year", "3.9"),
];

// (id, name, email, password, company, position, size)
const COMPANY_REPS: [(&str, &str, &str, &str, &str, &str, &str); 5] = [
    ("7", "Jennifer Martinez", "jennifer.m@techcorp.com", "jennifer2024", "TechCorp Solutions", "HR Manager", "500-1000 employees"),
    ("8", "David Kim", "david.kim@innovate.io", "david123", "Innovate Solutions", "Talent Acquisition Lead", "100-500 employees"),
    ("9", "Elena Petrov", "elena.petrov@globaltech.com", "elena2024", "GlobalTech Industries", "Recruitment Director", "1000+ employees"),
    ("10", "Aisha Okonkwo", "aisha.o@startuptech.io", "aisha123", "StartupTech", "People Operations Manager", "50-100 employees"),
    ("11", "Robert Anderson", "robert.anderson@megacorp.com", "robert2024", "MegaCorp Enterprise", "Senior HR Business Partner", "1000+ employees"),
];

// (id, name, email, password, institution, department)
const ADMINS: [(&str, &str, &str, &str, &str, &str); 4] = [
    ("12", "Dr. Sarah Chen", "sarah.chen@university.edu", "sarah2024", "Tech University", "Career Services"),
    ("13", "Prof. Michael O'Brien", "michael.obrien@statecollege.edu", "michael123", "State College", "Placement Office"),
    ("14", "Dr. Fatima Al-Zahra", "fatima.alzahra@engineeringcollege.edu", "fatima2024", "Engineering College", "Industry Relations"),
    ("15", "Dean Patricia Williams", "patricia.williams@university.edu", "patricia123", "Tech University", "Student Affairs"),
];

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn account(
    id: &str,
    name: &str,
    email: &str,
    password: &str,
    profile: Profile,
    iterations: u32,
    created_at: DateTime<Utc>,
) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        credential: Credential::hash(password, iterations),
        profile,
        created_at,
    }
}

/// The fixed demo accounts written into an empty directory: students first,
/// then company representatives, then college administrators.
pub fn demo_accounts(iterations: u32, created_at: DateTime<Utc>) -> Vec<Account> {
    let students = STUDENTS
        .iter()
        .map(|(id, name, email, password, university, major, year, gpa)| {
            let profile = Profile::Student(StudentProfile {
                university: some(university),
                major: some(major),
                year: some(year),
                gpa: some(gpa),
            });
            account(id, name, email, password, profile, iterations, created_at)
        });

    let companies = COMPANY_REPS
        .iter()
        .map(|(id, name, email, password, company, position, size)| {
            let profile = Profile::Company(CompanyProfile {
                company_name: some(company),
                position: some(position),
                company_size: some(size),
            });
            account(id, name, email, password, profile, iterations, created_at)
        });

    let admins = ADMINS
        .iter()
        .map(|(id, name, email, password, institution, department)| {
            let profile = Profile::Admin(AdminProfile {
                institution: some(institution),
                department: some(department),
            });
            account(id, name, email, password, profile, iterations, created_at)
        });

    students.chain(companies).chain(admins).collect()
}
