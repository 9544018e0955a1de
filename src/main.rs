use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{info, warn};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use placement_portal::directory::{AdminProfile, CompanyProfile, Registration, StudentProfile};
use placement_portal::opportunities::{
    demo_postings, load_postings, skill_catalog, CompanySize, DurationBucket, PostedWithin,
    StipendRange, WorkMode,
};
use placement_portal::utils::io::prompt_with_confirmation;
use placement_portal::utils::logging::initialize_logging;
use placement_portal::utils::time::{format_timestamp, utc_to_local};
use placement_portal::{
    apply_filters, Account, AccountPatch, FileStore, FilterCriteria, PortalConfig, Posting,
    Profile, Role, UserDirectory,
};

type CliResult = Result<(), Box<dyn Error>>;

fn profile_args() -> Vec<Arg> {
    [
        ("university", "Student: university"),
        ("major", "Student: major"),
        ("year", "Student: year of study"),
        ("gpa", "Student: GPA"),
        ("company", "Company: company name"),
        ("position", "Company: your position"),
        ("size", "Company: company size"),
        ("institution", "Admin: college or institution"),
        ("department", "Admin: department"),
    ]
    .into_iter()
    .map(|(name, help)| Arg::new(name).long(name).help(help).value_name("VALUE"))
    .collect()
}

fn build_cli() -> Command {
    Command::new("placement-portal")
        .about("Internship placement portal: accounts and internship search")
        .arg(
            Arg::new("data-file")
                .long("data-file")
                .global(true)
                .help("Path of the JSON data file (overrides PORTAL_DATA_FILE)")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("register")
                .about("Register a new account and log in")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("role")
                        .long("role")
                        .required(true)
                        .value_parser(Role::ALL.map(|role| role.as_str())),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Prompted for when omitted"),
                )
                .args(profile_args()),
        )
        .subcommand(
            Command::new("login")
                .about("Log in to an existing account")
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Prompted for when omitted"),
                ),
        )
        .subcommand(Command::new("logout").about("End the current session"))
        .subcommand(Command::new("whoami").about("Show the logged-in account"))
        .subcommand(
            Command::new("users").about("List registered accounts").arg(
                Arg::new("role")
                    .long("role")
                    .value_parser(Role::ALL.map(|role| role.as_str())),
            ),
        )
        .subcommand(
            Command::new("update-profile")
                .about("Update the logged-in account")
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("email").long("email"))
                .arg(Arg::new("password").long("password"))
                .args(profile_args()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete an account by id")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Search internship postings")
                .arg(Arg::new("query").help("Matches title, company, location or skill"))
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .action(ArgAction::Append)
                        .value_parser(WorkMode::ALL.map(|mode| mode.key()))
                        .help("Work mode (repeatable)"),
                )
                .arg(
                    Arg::new("duration")
                        .long("duration")
                        .action(ArgAction::Append)
                        .value_parser(DurationBucket::ALL.map(|bucket| bucket.key()))
                        .help("Duration in months (repeatable)"),
                )
                .arg(
                    Arg::new("skill")
                        .long("skill")
                        .action(ArgAction::Append)
                        .help("Required skill, exact name (repeatable)"),
                )
                .arg(
                    Arg::new("size")
                        .long("size")
                        .action(ArgAction::Append)
                        .value_parser(CompanySize::ALL.map(|size| size.key()))
                        .help("Company size (repeatable)"),
                )
                .arg(
                    Arg::new("min-stipend")
                        .long("min-stipend")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("max-stipend")
                        .long("max-stipend")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("posted-within")
                        .long("posted-within")
                        .help("all or a number of days"),
                )
                .arg(
                    Arg::new("postings")
                        .long("postings")
                        .help("JSON file with postings instead of the built-in list")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("skills")
                .about("List every skill that appears in the postings")
                .arg(
                    Arg::new("postings")
                        .long("postings")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let mut config = match PortalConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(2);
        }
    };
    if let Some(path) = matches.get_one::<PathBuf>("data-file") {
        config.data_file = path.clone();
    }

    if let Err(e) = initialize_logging(&config.log_file) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Err(e) = run(&matches, &config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches, config: &PortalConfig) -> CliResult {
    info!("Using data file {}", config.data_file.display());
    let store = FileStore::new(&config.data_file);
    let mut directory = UserDirectory::new(store, config.directory());

    match matches.subcommand() {
        Some(("register", sub)) => handle_register(&mut directory, sub),
        Some(("login", sub)) => handle_login(&mut directory, sub),
        Some(("logout", _)) => {
            directory.logout()?;
            println!("Logged out.");
            Ok(())
        }
        Some(("whoami", _)) => {
            match directory.current_session() {
                Some(account) => print_account_details(&account),
                None => println!("Not logged in."),
            }
            Ok(())
        }
        Some(("users", sub)) => handle_users(&directory, sub),
        Some(("update-profile", sub)) => handle_update(&mut directory, sub),
        Some(("delete", sub)) => handle_delete(&mut directory, sub),
        Some(("search", sub)) => handle_search(sub),
        Some(("skills", sub)) => {
            let postings = postings_for(sub)?;
            for skill in skill_catalog(&postings) {
                println!("{}", skill);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn string_arg(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn read_password_arg(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    match string_arg(matches, "password") {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

/// Collect the role-specific profile flags into a profile of `role`
fn profile_from_args(matches: &ArgMatches, role: Role) -> Profile {
    match role {
        Role::Student => Profile::Student(StudentProfile {
            university: string_arg(matches, "university"),
            major: string_arg(matches, "major"),
            year: string_arg(matches, "year"),
            gpa: string_arg(matches, "gpa"),
        }),
        Role::Company => Profile::Company(CompanyProfile {
            company_name: string_arg(matches, "company"),
            position: string_arg(matches, "position"),
            company_size: string_arg(matches, "size"),
        }),
        Role::Admin => Profile::Admin(AdminProfile {
            institution: string_arg(matches, "institution"),
            department: string_arg(matches, "department"),
        }),
    }
}

fn handle_register(directory: &mut UserDirectory<FileStore>, matches: &ArgMatches) -> CliResult {
    let role: Role = string_arg(matches, "role").unwrap_or_default().parse()?;
    let registration = Registration::new(
        string_arg(matches, "name").unwrap_or_default(),
        string_arg(matches, "email").unwrap_or_default(),
        read_password_arg(matches)?,
        role,
    )
    .with_profile(profile_from_args(matches, role));

    let account = directory.register(registration)?;
    println!("Welcome, {}! You are registered as {}.", account.name, account.role());
    Ok(())
}

fn handle_login(directory: &mut UserDirectory<FileStore>, matches: &ArgMatches) -> CliResult {
    let email = string_arg(matches, "email").unwrap_or_default();
    let password = read_password_arg(matches)?;

    let account = directory.login(&email, &password)?;
    println!("Welcome back, {}!", account.name);
    Ok(())
}

fn handle_users(directory: &UserDirectory<FileStore>, matches: &ArgMatches) -> CliResult {
    let accounts = match string_arg(matches, "role") {
        Some(role) => directory.accounts_by_role(role.parse()?)?,
        None => directory.all_accounts()?,
    };

    if accounts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }
    for account in &accounts {
        println!(
            "{:<18} {:<8} {:<26} {:<40} {}",
            account.id,
            account.role(),
            account.name,
            account.email,
            format_timestamp(&account.created_at)
        );
    }
    Ok(())
}

fn handle_update(directory: &mut UserDirectory<FileStore>, matches: &ArgMatches) -> CliResult {
    let account = match directory.current_session() {
        Some(account) => account,
        None => return Err("Please log in first.".into()),
    };

    let profile = profile_from_args(matches, account.role());
    let patch = AccountPatch {
        name: string_arg(matches, "name"),
        email: string_arg(matches, "email"),
        password: string_arg(matches, "password"),
        profile: if profile == Profile::empty(account.role()) {
            None
        } else {
            Some(profile)
        },
    };

    if patch.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    let updated = directory.try_update_account(&account.id, patch)?;
    println!("Profile updated successfully!");
    print_account_details(&updated);
    Ok(())
}

fn handle_delete(directory: &mut UserDirectory<FileStore>, matches: &ArgMatches) -> CliResult {
    let id = string_arg(matches, "id").unwrap_or_default();

    if !matches.get_flag("yes") {
        let confirmed = prompt_with_confirmation(
            &format!("Account {} will be permanently deleted.", id),
            "Continue?",
        )?;
        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    if directory.delete_account(&id) {
        println!("Account {} deleted.", id);
    } else {
        warn!("Delete requested for unknown account {}", id);
        println!("No account with id {}.", id);
    }
    Ok(())
}

fn postings_for(matches: &ArgMatches) -> Result<Vec<Posting>, Box<dyn Error>> {
    match matches.get_one::<PathBuf>("postings") {
        Some(path) => Ok(load_postings(Path::new(path))?),
        None => Ok(demo_postings().to_vec()),
    }
}

fn values<'a>(matches: &'a ArgMatches, name: &str) -> impl Iterator<Item = &'a String> {
    matches.get_many::<String>(name).into_iter().flatten()
}

/// Translate the search flags into filter criteria
fn criteria_from_args(matches: &ArgMatches) -> Result<FilterCriteria, Box<dyn Error>> {
    let mut criteria = FilterCriteria::new();
    criteria.search = string_arg(matches, "query").unwrap_or_default();

    for mode in values(matches, "mode") {
        criteria.set_work_mode(mode.parse::<WorkMode>()?, true);
    }
    for duration in values(matches, "duration") {
        criteria.set_duration(duration.parse::<DurationBucket>()?, true);
    }
    for skill in values(matches, "skill") {
        criteria.set_skill(skill.as_str(), true);
    }
    for size in values(matches, "size") {
        criteria.set_company_size(size.parse::<CompanySize>()?, true);
    }

    let defaults = StipendRange::default();
    criteria.stipend = StipendRange::new(
        matches
            .get_one::<u32>("min-stipend")
            .copied()
            .unwrap_or(defaults.min),
        matches
            .get_one::<u32>("max-stipend")
            .copied()
            .unwrap_or(defaults.max),
    );

    if let Some(raw) = matches.get_one::<String>("posted-within") {
        criteria.posted_within = raw.parse::<PostedWithin>()?;
    }

    Ok(criteria)
}

fn handle_search(matches: &ArgMatches) -> CliResult {
    let postings = postings_for(matches)?;
    let criteria = criteria_from_args(matches)?;
    let results = apply_filters(&postings, &criteria);

    println!(
        "{} of {} internships ({} filters active)\n",
        results.len(),
        postings.len(),
        criteria.active_filter_count()
    );
    for posting in results {
        print_posting(posting);
    }
    Ok(())
}

fn print_posting(posting: &Posting) {
    println!("{} at {}", posting.title, posting.organization);
    println!(
        "  {} ({}) | {} | {} | {}",
        posting.location,
        posting.work_mode,
        posting.stipend_label(),
        posting.duration_label(),
        posting.posted_label()
    );
    println!("  Skills: {}", posting.skills.join(", "));
    println!("  Company size: {}\n", posting.company_size);
}

fn print_account_details(account: &Account) {
    println!("Name:    {}", account.name);
    println!("Email:   {}", account.email);
    println!("Role:    {}", account.role());
    println!("Id:      {}", account.id);
    println!("Joined:  {}", utc_to_local(&account.created_at));
    let summary = account.profile.summary();
    if !summary.is_empty() {
        println!("Profile: {}", summary);
    }
}
