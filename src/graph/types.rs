//! Core types for the CivixNet social graph.
//!
//! Defines accounts, the case-insensitive key used to order them,
//! and the summary structures returned by graph queries.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{CivixError, Result};

/// Longest account name accepted, in characters.
pub const MAX_NAME_LEN: usize = 15;

/// Case-insensitive projection of an account name.
///
/// This is the only key the graph orders and looks accounts up by,
/// so `"Alice"`, `"alice"` and `"ALICE"` all resolve to the same entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameKey(String);

impl NameKey {
    pub fn new(name: &str) -> Self {
        NameKey(name.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A named, credentialed member of the network.
///
/// Equality, hashing and ordering only look at the name, compared
/// case-insensitively. The credential never takes part.
#[derive(Clone)]
pub struct Account {
    name: String,
    credential: String,
}

impl Account {
    /// Create an account, validating both the name and the credential.
    pub fn new(name: impl Into<String>, credential: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let credential = credential.into();
        validate_name(&name)?;
        validate_credential(&credential)?;
        Ok(Self { name, credential })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn key(&self) -> NameKey {
        NameKey::new(&self.name)
    }

    /// Rename a free-standing account. Accounts held by a graph are only
    /// handed out by shared reference, so their identity cannot change.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Replace the credential. On failure the previous credential is kept.
    pub fn set_credential(&mut self, credential: impl Into<String>) -> Result<()> {
        let credential = credential.into();
        validate_credential(&credential)?;
        self.credential = credential;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CivixError::Validation(
            "account name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CivixError::Validation(format!(
            "account name '{}' exceeds {} characters",
            name, MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn validate_credential(credential: &str) -> Result<()> {
    let has_upper = credential.chars().any(char::is_uppercase);
    let has_lower = credential.chars().any(char::is_lowercase);
    let has_digit = credential.chars().any(|c| c.is_ascii_digit());
    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(CivixError::Validation(
            "credential needs an uppercase letter, a lowercase letter and a digit".to_string(),
        ))
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Account {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Account {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// One account as it appears in external input and in snapshots.
///
/// Field aliases accept the original network file layout
/// (`username` / `password` / `abonnements`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(alias = "username")]
    pub name: String,
    #[serde(alias = "password")]
    pub credential: String,
    #[serde(default, alias = "abonnements")]
    pub follows: Vec<String>,
}

/// Size summary of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub account_count: usize,
    pub follow_count: usize,
    /// Unordered pairs of distinct accounts following each other.
    pub mutual_pairs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("alice", "Alice123secure").unwrap();
        assert_eq!(account.name(), "alice");
        assert_eq!(account.credential(), "Alice123secure");
    }

    #[test]
    fn test_compare_is_case_insensitive() {
        let alice = Account::new("alice", "Alice123secure").unwrap();
        let bob = Account::new("bob", "Bob123secure").unwrap();
        let alice_upper = Account::new("ALICE", "Other123pass").unwrap();

        assert_eq!(alice.cmp(&bob), Ordering::Less);
        assert_eq!(bob.cmp(&alice), Ordering::Greater);
        assert_eq!(alice.cmp(&alice_upper), Ordering::Equal);
        assert_eq!(alice, alice_upper);
    }

    #[test]
    fn test_name_length_limit() {
        assert!(Account::new("a".repeat(15), "Valid1pass").is_ok());
        let err = Account::new("x".repeat(16), "Valid1pass").unwrap_err();
        assert!(matches!(err, CivixError::Validation(_)));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 15 two-byte characters are still 15 characters
        assert!(Account::new("é".repeat(15), "Valid1pass").is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Account::new("", "Valid1pass").unwrap_err();
        assert!(matches!(err, CivixError::Validation(_)));
    }

    #[test]
    fn test_set_name() {
        let mut account = Account::new("bob", "Bob123secure").unwrap();
        account.set_name("alice").unwrap();
        assert_eq!(account.name(), "alice");

        assert!(account.set_name("aaaaaaaaaaaaaaaa").is_err());
        assert_eq!(account.name(), "alice");
    }

    #[test]
    fn test_set_credential() {
        let mut account = Account::new("bob", "Bob123secure").unwrap();
        account.set_credential("Bob123secure78").unwrap();
        assert_eq!(account.credential(), "Bob123secure78");

        for bad in ["", "bob123secure", "BOB123SECURE", "Bobsecure"] {
            let err = account.set_credential(bad).unwrap_err();
            assert!(matches!(err, CivixError::Validation(_)), "{bad} accepted");
        }
        assert_eq!(account.credential(), "Bob123secure78");
    }

    #[test]
    fn test_credential_digit_must_be_decimal() {
        // Fractions, superscripts and roman numerals are numeric but not digits
        for bad in ["Password½", "Password²", "PasswordⅣ"] {
            let err = Account::new("alice", bad).unwrap_err();
            assert!(matches!(err, CivixError::Validation(_)), "{bad} accepted");
        }
        assert!(Account::new("alice", "Password7").is_ok());
    }

    #[test]
    fn test_debug_redacts_credential() {
        let account = Account::new("alice", "Alice123secure").unwrap();
        let debug = format!("{:?}", account);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("Alice123secure"));
        assert_eq!(account.to_string(), "alice");
    }
}
