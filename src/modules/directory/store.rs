use log::{debug, error, warn};
use rand::Rng;

use super::error::DirectoryError;
use super::model::{Account, AccountPatch, Registration, Role};
use super::password::{validate_password, Credential};
use super::seed::demo_accounts;
use crate::modules::storage::{KeyValueStore, StorageError};
use crate::modules::utils::io::is_valid_email;
use crate::modules::utils::logging::{log_auth_event, log_directory_operation};
use crate::modules::utils::time;
use crate::{CURRENT_USER_KEY, DEFAULT_HASH_ITERATIONS, USERS_KEY};

/// Settings for a directory instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub hash_iterations: u32,
    pub seed_demo_accounts: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            seed_demo_accounts: true,
        }
    }
}

/// Registered accounts plus the single active session, kept in an injected
/// key-value store.
///
/// Every operation reads the current state from the store and every mutation
/// writes the complete account list back, so several directories over the same
/// store always agree (last write wins).
pub struct UserDirectory<S: KeyValueStore> {
    store: S,
    config: DirectoryConfig,
}

impl<S: KeyValueStore> UserDirectory<S> {
    /// Create a directory over `store`, seeding demo accounts if it is empty
    pub fn new(store: S, config: DirectoryConfig) -> Self {
        let mut directory = Self { store, config };
        directory.initialize();
        directory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Seed the demo accounts when no account list exists yet.
    /// Storage failures are logged and otherwise ignored.
    pub fn initialize(&mut self) {
        if !self.config.seed_demo_accounts {
            return;
        }

        match self.load_accounts() {
            Ok(accounts) if accounts.is_empty() => {
                let seeded = demo_accounts(self.config.hash_iterations, time::now());
                match self.save_accounts(&seeded) {
                    Ok(()) => log_directory_operation(
                        "seed",
                        "system",
                        USERS_KEY,
                        true,
                        Some(&format!("{} demo accounts", seeded.len())),
                    ),
                    Err(e) => warn!("Skipping demo account seeding: {}", e),
                }
            }
            Ok(_) => debug!("Account store already populated, not seeding"),
            Err(e) => warn!("Skipping demo account seeding: {}", e),
        }
    }

    /// Every stored account, in storage order
    pub fn all_accounts(&self) -> Result<Vec<Account>, DirectoryError> {
        Ok(self.load_accounts()?)
    }

    /// Accounts with the given role, in storage order
    pub fn accounts_by_role(&self, role: Role) -> Result<Vec<Account>, DirectoryError> {
        Ok(self
            .load_accounts()?
            .into_iter()
            .filter(|account| account.role() == role)
            .collect())
    }

    /// Register a new account and make it the active session
    pub fn register(&mut self, registration: Registration) -> Result<Account, DirectoryError> {
        let Registration {
            name,
            email,
            password,
            profile,
        } = registration;
        let name = name.trim().to_string();
        let email = email.trim().to_string();

        if let Err(e) = validate_registration(&name, &email, &password) {
            log_auth_event("register", &email, false, Some(&e.to_string()));
            return Err(e);
        }

        let mut accounts = self.load_accounts()?;
        if accounts.iter().any(|account| account.has_email(&email)) {
            log_auth_event("register", &email, false, Some("duplicate email"));
            return Err(DirectoryError::DuplicateEmail);
        }

        let account = Account {
            id: generate_account_id(&accounts),
            name,
            email,
            credential: Credential::hash(&password, self.config.hash_iterations),
            profile,
            created_at: time::now(),
        };

        accounts.push(account.clone());
        self.save_accounts(&accounts)?;
        if let Err(e) = self.set_session(&account) {
            accounts.pop();
            return Err(self.roll_back(&accounts, e));
        }

        log_auth_event("register", &account.email, true, Some(account.role().as_str()));
        Ok(account)
    }

    /// Authenticate and make the matching account the active session
    pub fn login(&mut self, email: &str, password: &str) -> Result<Account, DirectoryError> {
        if email.trim().is_empty() || password.is_empty() {
            log_auth_event("login", email, false, Some("blank credentials"));
            return Err(DirectoryError::InvalidCredentials);
        }

        let account = self
            .load_accounts()?
            .into_iter()
            .find(|account| account.has_email(email));

        // Unknown emails pay for one derivation too
        let verified = match &account {
            Some(account) => account.credential.verify(password),
            None => Credential::placeholder(self.config.hash_iterations).verify(password),
        };

        match account {
            Some(account) if verified => {
                self.set_session(&account)?;
                log_auth_event("login", &account.email, true, None);
                Ok(account)
            }
            _ => {
                log_auth_event("login", email, false, None);
                Err(DirectoryError::InvalidCredentials)
            }
        }
    }

    /// Clear the active session. Calling it while logged out is fine.
    pub fn logout(&mut self) -> Result<(), DirectoryError> {
        self.store.remove(CURRENT_USER_KEY)?;
        log_auth_event("logout", "session", true, None);
        Ok(())
    }

    /// The active session's account snapshot, if any. Errors are logged and
    /// reported as "no session".
    pub fn current_session(&mut self) -> Option<Account> {
        match self.try_current_session() {
            Ok(session) => session,
            Err(e) => {
                error!("Could not read the current session: {}", e);
                None
            }
        }
    }

    /// The active session's account snapshot. A session whose account no longer
    /// exists is cleared and reported as absent.
    pub fn try_current_session(&mut self) -> Result<Option<Account>, DirectoryError> {
        let session = match self.load_session()? {
            Some(session) => session,
            None => return Ok(None),
        };

        let still_exists = self
            .load_accounts()?
            .iter()
            .any(|account| account.id == session.id);
        if !still_exists {
            warn!("Session refers to deleted account {}, clearing it", session.id);
            self.store.remove(CURRENT_USER_KEY)?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Merge `patch` into the account with `id`. Returns false if the account
    /// does not exist or the update was rejected.
    pub fn update_account(&mut self, id: &str, patch: AccountPatch) -> bool {
        match self.try_update_account(id, patch) {
            Ok(_) => true,
            Err(DirectoryError::NotFound(_)) => false,
            Err(e) => {
                error!("Update of account {} failed: {}", id, e);
                false
            }
        }
    }

    /// Merge `patch` into the account with `id` and return the updated account.
    /// The active session snapshot follows if it is the same account.
    pub fn try_update_account(
        &mut self,
        id: &str,
        patch: AccountPatch,
    ) -> Result<Account, DirectoryError> {
        let mut accounts = self.load_accounts()?;
        let index = match accounts.iter().position(|account| account.id == id) {
            Some(index) => index,
            None => {
                log_directory_operation("update", id, USERS_KEY, false, Some("not found"));
                return Err(DirectoryError::NotFound(id.to_string()));
            }
        };

        let AccountPatch {
            name,
            email,
            password,
            profile,
        } = patch;

        // Validate everything before touching the record
        let name = match name {
            Some(name) if name.trim().is_empty() => {
                return Err(DirectoryError::MissingField("name"));
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };
        let email = match email {
            Some(email) => {
                let email = email.trim().to_string();
                if !is_valid_email(&email) {
                    return Err(DirectoryError::InvalidEmail);
                }
                let taken = accounts
                    .iter()
                    .any(|account| account.id != id && account.has_email(&email));
                if taken {
                    return Err(DirectoryError::DuplicateEmail);
                }
                Some(email)
            }
            None => None,
        };
        let credential = match password {
            Some(password) => {
                validate_password(&password)?;
                Some(Credential::hash(&password, self.config.hash_iterations))
            }
            None => None,
        };

        let mut updated = accounts[index].clone();
        if let Some(profile) = profile {
            updated.profile.merge(profile)?;
        }
        if let Some(name) = name {
            updated.name = name;
        }
        if let Some(email) = email {
            updated.email = email;
        }
        if let Some(credential) = credential {
            updated.credential = credential;
        }

        let session_follows = matches!(self.load_session()?, Some(session) if session.id == id);
        let previous = std::mem::replace(&mut accounts[index], updated.clone());
        self.save_accounts(&accounts)?;

        if session_follows {
            if let Err(e) = self.set_session(&updated) {
                accounts[index] = previous;
                return Err(self.roll_back(&accounts, e));
            }
        }

        log_directory_operation("update", &updated.email, USERS_KEY, true, None);
        Ok(updated)
    }

    /// Remove the account with `id`. Returns false if it does not exist.
    pub fn delete_account(&mut self, id: &str) -> bool {
        match self.try_delete_account(id) {
            Ok(_) => true,
            Err(DirectoryError::NotFound(_)) => false,
            Err(e) => {
                error!("Deletion of account {} failed: {}", id, e);
                false
            }
        }
    }

    /// Remove the account with `id` and return it. Deleting the active
    /// session's account also ends the session.
    pub fn try_delete_account(&mut self, id: &str) -> Result<Account, DirectoryError> {
        let mut accounts = self.load_accounts()?;
        let index = match accounts.iter().position(|account| account.id == id) {
            Some(index) => index,
            None => {
                log_directory_operation("delete", id, USERS_KEY, false, Some("not found"));
                return Err(DirectoryError::NotFound(id.to_string()));
            }
        };

        let ends_session = matches!(self.load_session()?, Some(session) if session.id == id);
        let removed = accounts.remove(index);
        self.save_accounts(&accounts)?;

        if ends_session {
            if let Err(e) = self.store.remove(CURRENT_USER_KEY) {
                accounts.insert(index, removed);
                return Err(self.roll_back(&accounts, e));
            }
            log_auth_event("logout", "session", true, None);
        }

        log_directory_operation("delete", &removed.email, USERS_KEY, true, None);
        Ok(removed)
    }

    /// Write `previous` back after the session key could not follow a committed
    /// account list, and return the session failure
    fn roll_back(&mut self, previous: &[Account], cause: StorageError) -> DirectoryError {
        match self.save_accounts(previous) {
            Ok(()) => warn!("Session write failed, account list restored: {}", cause),
            Err(e) => error!(
                "Session write failed and the account list could not be restored: {}",
                e
            ),
        }
        cause.into()
    }

    fn load_accounts(&self) -> Result<Vec<Account>, StorageError> {
        match self.store.get(USERS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::Corrupt(format!("{}: {}", USERS_KEY, e))),
            None => Ok(Vec::new()),
        }
    }

    fn save_accounts(&mut self, accounts: &[Account]) -> Result<(), StorageError> {
        let data =
            serde_json::to_string(accounts).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        self.store.set(USERS_KEY, &data)
    }

    fn load_session(&self) -> Result<Option<Account>, StorageError> {
        match self.store.get(CURRENT_USER_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::Corrupt(format!("{}: {}", CURRENT_USER_KEY, e))),
            None => Ok(None),
        }
    }

    fn set_session(&mut self, account: &Account) -> Result<(), StorageError> {
        let data =
            serde_json::to_string(account).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        self.store.set(CURRENT_USER_KEY, &data)
    }
}

/// Check the sign-up form fields before anything is looked up or stored
fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), DirectoryError> {
    if name.is_empty() {
        return Err(DirectoryError::MissingField("name"));
    }
    if email.is_empty() {
        return Err(DirectoryError::MissingField("email"));
    }
    if password.is_empty() {
        return Err(DirectoryError::MissingField("password"));
    }
    validate_password(password)?;
    if !is_valid_email(email) {
        return Err(DirectoryError::InvalidEmail);
    }
    Ok(())
}

/// Draw random 64-bit ids until one is not already taken
fn generate_account_id(existing: &[Account]) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let candidate = format!("{:016x}", rng.gen::<u64>());
        if !existing.iter().any(|account| account.id == candidate) {
            return candidate;
        }
    }
}
