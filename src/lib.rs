// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{config, directory, opportunities, storage, utils};

// Re-export commonly used types
pub use modules::config::PortalConfig;
pub use modules::directory::{
    Account, AccountPatch, DirectoryConfig, DirectoryError, Profile, Registration, Role,
    UserDirectory,
};
pub use modules::opportunities::{apply_filters, FilterCriteria, Posting};
pub use modules::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

// Storage keys
pub const USERS_KEY: &str = "portal_users";
pub const CURRENT_USER_KEY: &str = "portal_current_user";

// Defaults
pub const DEFAULT_DATA_FILE: &str = "portal_data.json";
pub const DEFAULT_LOG_FILE: &str = "portal.log";
pub const DEFAULT_HASH_ITERATIONS: u32 = 100_000;
pub const MIN_PASSWORD_LENGTH: usize = 6;

// Type aliases
pub type HmacSha256 = hmac::Hmac<sha2::Sha256>;
