use serde::{Deserialize, Serialize};
use std::fmt;

/// Name identifying a participant in the current session.
///
/// Names are compared exactly (case-sensitive). Construct them through
/// [`ParticipantRegistry::add`] to get trimming and blank-name rejection;
/// [`ParticipantName::new`] takes the string as-is.
///
/// # Examples
///
/// ```
/// use expense_splitter::core::participant::ParticipantName;
///
/// let alice = ParticipantName::new("Alice");
/// let bob = ParticipantName::new("Bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ParticipantName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Why a name could not be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryRejection {
    Blank,
    Duplicate(ParticipantName),
}

/// Ordered list of session participants.
///
/// Insertion order is preserved and drives the order of the balance sheet.
/// Duplicate names are kept as separate entries unless the registry was
/// built with [`ParticipantRegistry::unique`]; each occurrence counts
/// toward the split divisor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRegistry {
    names: Vec<ParticipantName>,
    #[serde(default)]
    reject_duplicates: bool,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that refuses names already present.
    pub fn unique() -> Self {
        Self {
            names: Vec::new(),
            reject_duplicates: true,
        }
    }

    pub fn rejects_duplicates(&self) -> bool {
        self.reject_duplicates
    }

    /// Trim and append a name. Blank names are refused.
    pub fn add(&mut self, raw: &str) -> Result<ParticipantName, RegistryRejection> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RegistryRejection::Blank);
        }
        let name = ParticipantName::new(trimmed);
        if self.reject_duplicates && self.contains(&name) {
            return Err(RegistryRejection::Duplicate(name));
        }
        self.names.push(name.clone());
        Ok(name)
    }

    /// Remove every occurrence of `name`. Returns how many were removed.
    pub fn remove_all(&mut self, name: &ParticipantName) -> usize {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        before - self.names.len()
    }

    pub fn contains(&self, name: &ParticipantName) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantName> {
        self.names.iter()
    }

    pub fn as_slice(&self) -> &[ParticipantName] {
        &self.names
    }

    /// Names in first-seen order with duplicates collapsed.
    pub fn distinct(&self) -> Vec<&ParticipantName> {
        let mut seen: Vec<&ParticipantName> = Vec::with_capacity(self.names.len());
        for name in &self.names {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }
}

impl<'a> FromIterator<&'a str> for ParticipantRegistry {
    /// Collect names, silently skipping blanks.
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut registry = Self::new();
        for raw in iter {
            let _ = registry.add(raw);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_equality_is_case_sensitive() {
        assert_eq!(ParticipantName::new("Alice"), ParticipantName::new("Alice"));
        assert_ne!(ParticipantName::new("Alice"), ParticipantName::new("alice"));
    }

    #[test]
    fn test_add_trims() {
        let mut reg = ParticipantRegistry::new();
        let name = reg.add("  Carol ").unwrap();
        assert_eq!(name.as_str(), "Carol");
        assert!(reg.contains(&ParticipantName::new("Carol")));
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut reg = ParticipantRegistry::new();
        assert_eq!(reg.add(""), Err(RegistryRejection::Blank));
        assert_eq!(reg.add(" \t "), Err(RegistryRejection::Blank));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_duplicates_allowed_by_default() {
        let mut reg = ParticipantRegistry::new();
        reg.add("Bob").unwrap();
        reg.add("Bob").unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.distinct().len(), 1);
    }

    #[test]
    fn test_unique_registry_rejects_duplicates() {
        let mut reg = ParticipantRegistry::unique();
        reg.add("Bob").unwrap();
        assert_eq!(
            reg.add(" Bob"),
            Err(RegistryRejection::Duplicate(ParticipantName::new("Bob")))
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_all_occurrences() {
        let mut reg: ParticipantRegistry = ["Alice", "Bob", "Alice"].into_iter().collect();
        assert_eq!(reg.remove_all(&ParticipantName::new("Alice")), 2);
        let left: Vec<&str> = reg.iter().map(|n| n.as_str()).collect();
        assert_eq!(left, vec!["Bob"]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut reg: ParticipantRegistry = ["Alice"].into_iter().collect();
        assert_eq!(reg.remove_all(&ParticipantName::new("Dave")), 0);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_distinct_keeps_first_seen_order() {
        let reg: ParticipantRegistry = ["Carol", "Alice", "Carol", "Bob"].into_iter().collect();
        let names: Vec<&str> = reg.distinct().into_iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    }
}
