pub mod error;
pub mod model;
pub mod password;
mod seed;
pub mod store;

// Re-export the main types and functions
pub use error::DirectoryError;
pub use model::{
    Account, AccountPatch, AdminProfile, CompanyProfile, Profile, Registration, Role,
    RoleMismatch, StudentProfile,
};
pub use password::{validate_password, Credential, PasswordError};
pub use seed::demo_accounts;
pub use store::{DirectoryConfig, UserDirectory};
