use env_logger::{Builder, WriteStyle};
use log::{error, info, warn, LevelFilter};
use std::fs::OpenOptions;
use std::path::Path;

/// Initialize the logging system, appending to the given log file.
/// `RUST_LOG` overrides the default `info` level.
pub fn initialize_logging(log_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format_timestamp_secs()
        .format_module_path(true)
        .write_style(WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;

    info!("Logging system initialized");
    Ok(())
}

/// Mask an identifier (email, name) before it reaches the log
pub fn format_sensitive(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Structured logging for authentication events (register, login, logout)
pub fn log_auth_event(event_type: &str, email: &str, success: bool, details: Option<&str>) {
    if success {
        info!(
            "Auth event: type={}, user={}, success=true, details={:?}",
            event_type,
            format_sensitive(email),
            details
        );
    } else {
        warn!(
            "Auth event: type={}, user={}, success=false, details={:?}",
            event_type,
            format_sensitive(email),
            details
        );
    }
}

/// Structured logging for account directory mutations
pub fn log_directory_operation(
    operation: &str,
    actor: &str,
    resource: &str,
    success: bool,
    details: Option<&str>,
) {
    if success {
        info!(
            "Directory operation: op={}, actor={}, resource={}, success=true, details={:?}",
            operation,
            format_sensitive(actor),
            resource,
            details
        );
    } else {
        error!(
            "Directory operation: op={}, actor={}, resource={}, success=false, details={:?}",
            operation,
            format_sensitive(actor),
            resource,
            details
        );
    }
}
