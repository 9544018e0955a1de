use pbkdf2::pbkdf2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{HmacSha256, MIN_PASSWORD_LENGTH};

/// Password strength problems reported at registration or password change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    TooShort,
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordError::TooShort => write!(
                f,
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
        }
    }
}

/// Function to validate password strength
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    Ok(())
}

/// Function to generate a random salt for PBKDF2
pub fn generate_random_salt() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..16).map(|_| rng.gen()).collect()
}

/// Function to derive a 32-byte key from the password using PBKDF2
pub fn derive_key_from_password(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut key = vec![0u8; 32];
    pbkdf2::<HmacSha256>(password.as_bytes(), salt, iterations.max(1), &mut key);
    key
}

/// Stored password verifier. The plaintext never leaves `hash`/`verify`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credential {
    pub hash: String, // hex
    pub salt: String, // hex
    pub iterations: u32,
}

impl Credential {
    /// Hash a password with a fresh random salt
    pub fn hash(password: &str, iterations: u32) -> Self {
        let salt = generate_random_salt();
        let iterations = iterations.max(1);
        let key = derive_key_from_password(password, &salt, iterations);
        Self {
            hash: hex::encode(key),
            salt: hex::encode(salt),
            iterations,
        }
    }

    /// Verifier that accepts no password but costs one full derivation,
    /// checked when a login names an unknown email
    pub fn placeholder(iterations: u32) -> Self {
        Self {
            hash: String::new(),
            salt: "00".repeat(16),
            iterations: iterations.max(1),
        }
    }

    /// Check a candidate password against the stored hash
    pub fn verify(&self, password: &str) -> bool {
        let salt = match hex::decode(&self.salt) {
            Ok(salt) => salt,
            Err(_) => return false,
        };
        let expected = match hex::decode(&self.hash) {
            Ok(hash) => hash,
            Err(_) => return false,
        };
        let candidate = derive_key_from_password(password, &salt, self.iterations);

        // Compare without short-circuiting on the first differing byte
        candidate.len() == expected.len()
            && candidate
                .iter()
                .zip(expected.iter())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

// Keep hashes out of debug output
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_validation() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("123456").is_ok());
        assert_eq!(validate_password("12345"), Err(PasswordError::TooShort));
        assert_eq!(validate_password(""), Err(PasswordError::TooShort));
    }

    #[test]
    fn test_placeholder_never_verifies() {
        let placeholder = Credential::placeholder(10);
        assert_eq!(placeholder.iterations, 10);
        assert!(!placeholder.verify(""));
        assert!(!placeholder.verify("priya2024"));
        assert_eq!(Credential::placeholder(0).iterations, 1);
    }

    #[test]
    fn test_key_derivation() {
        let salt = generate_random_salt();

        let key = derive_key_from_password("priya2024", &salt, 10);
        assert_eq!(key.len(), 32);
        assert_eq!(key, derive_key_from_password("priya2024", &salt, 10));
        assert_ne!(key, derive_key_from_password("marcus123", &salt, 10));
        assert_ne!(key, derive_key_from_password("priya2024", &salt, 11));

        let different_salt = generate_random_salt();
        assert_ne!(key, derive_key_from_password("priya2024", &different_salt, 10));
    }

    #[test]
    fn test_random_salt() {
        let salt1 = generate_random_salt();
        let salt2 = generate_random_salt();
        assert_eq!(salt1.len(), 16);
        assert_ne!(salt1, salt2);
    }

    #[test]
    fn test_credential_verification() {
        let credential = Credential::hash("secret1", 10);
        assert!(credential.verify("secret1"));
        assert!(!credential.verify("Secret1"));
        assert!(!credential.verify("wrong"));
        assert!(!credential.verify(""));

        // The plaintext is not stored anywhere in the record
        let json = serde_json::to_string(&credential).unwrap();
        assert!(!json.contains("secret1"));
        assert!(!format!("{:?}", credential).contains(&credential.hash));

        // Same password, different salt, different hash
        let other = Credential::hash("secret1", 10);
        assert_ne!(credential.hash, other.hash);
        assert!(other.verify("secret1"));
    }

    #[test]
    fn test_corrupt_credential_never_verifies() {
        let mut credential = Credential::hash("secret1", 1);
        credential.salt = "not-hex".to_string();
        assert!(!credential.verify("secret1"));
    }
}
