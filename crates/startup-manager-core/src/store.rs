//! Persistent storage of startup entries.
//!
//! On Windows the store is the per-user Run key (see
//! `startup_manager_windows::registry`). [`MemoryStore`] mirrors its
//! semantics in memory for tests. Non-Windows builds have no store and
//! the CLI refuses store commands there.

use std::collections::BTreeMap;
use std::fmt;

use crate::entry::StartupEntry;

/// Registry path, relative to `HKEY_CURRENT_USER`, whose values are
/// launched at user logon.
pub const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// Why a store operation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No entry is registered under the given name.
    NotFound(String),
    /// The underlying OS call failed (permission denied, I/O, ...).
    Os(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "{name} is not in startup"),
            Self::Os(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for StoreError {}

/// A namespace of startup entries keyed by name.
///
/// Names are unique: adding an existing name overwrites its path.
/// Implementations hold no open handles between calls.
pub trait StartupStore {
    /// Returns true iff an entry exists under `name`. Access failures
    /// read as "not found".
    fn exists(&self, name: &str) -> bool;

    /// Returns the stored path for `name`, or `None` if absent or unreadable.
    fn get(&self, name: &str) -> Option<String>;

    /// Writes (or overwrites) the entry `name` → `path`. The path is
    /// stored as given, without checking that it exists.
    fn add(&mut self, name: &str, path: &str) -> Result<(), StoreError>;

    /// Deletes the entry `name`. Fails with [`StoreError::NotFound`] if
    /// it does not exist.
    fn remove(&mut self, name: &str) -> Result<(), StoreError>;

    /// Lists every entry, sorted by name (case-insensitive).
    fn list(&self) -> Result<Vec<StartupEntry>, StoreError>;
}

impl<S: StartupStore + ?Sized> StartupStore for Box<S> {
    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }

    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn add(&mut self, name: &str, path: &str) -> Result<(), StoreError> {
        (**self).add(name, path)
    }

    fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        (**self).remove(name)
    }

    fn list(&self) -> Result<Vec<StartupEntry>, StoreError> {
        (**self).list()
    }
}

/// In-memory store with the same case-insensitive naming as the registry.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, StartupEntry>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose mutations all fail, like a Run key opened without
    /// write access.
    pub fn read_only(entries: impl IntoIterator<Item = StartupEntry>) -> Self {
        let mut store = Self::default();
        for entry in entries {
            store.entries.insert(fold(&entry.name), entry);
        }
        store.read_only = true;
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Os("access is denied".into()));
        }
        Ok(())
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

impl StartupStore for MemoryStore {
    fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(&fold(name))
    }

    fn get(&self, name: &str) -> Option<String> {
        self.entries.get(&fold(name)).map(|e| e.path.clone())
    }

    fn add(&mut self, name: &str, path: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.entries
            .entry(fold(name))
            .and_modify(|e| e.path = path.to_string())
            .or_insert_with(|| StartupEntry::new(name, path));
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        match self.entries.remove(&fold(name)) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(name.to_string())),
        }
    }

    fn list(&self) -> Result<Vec<StartupEntry>, StoreError> {
        // BTreeMap keys are already folded, so iteration order is the
        // case-insensitive name order.
        Ok(self.entries.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MYAPP: &str = r"C:\tools\myapp.exe";

    #[test]
    fn missing_name_does_not_exist() {
        let store = MemoryStore::new();

        assert!(!store.exists("MyApp"));
        assert_eq!(store.get("MyApp"), None);
    }

    #[test]
    fn add_then_remove_round_trip() {
        // Arrange
        let mut store = MemoryStore::new();

        // Act
        store.add("MyApp", MYAPP).unwrap();

        // Assert
        assert!(store.exists("MyApp"));
        assert_eq!(store.get("MyApp").as_deref(), Some(MYAPP));

        store.remove("MyApp").unwrap();
        assert!(!store.exists("MyApp"));
    }

    #[test]
    fn remove_missing_fails_and_leaves_store_unchanged() {
        // Arrange
        let mut store = MemoryStore::new();
        store.add("Other", r"C:\other.exe").unwrap();

        // Act
        let result = store.remove("MyApp");

        // Assert
        assert_eq!(result, Err(StoreError::NotFound("MyApp".into())));
        assert_eq!(store.len(), 1);
        assert!(store.exists("Other"));
    }

    #[test]
    fn add_existing_name_overwrites_path() {
        // Arrange
        let mut store = MemoryStore::new();
        store.add("MyApp", MYAPP).unwrap();

        // Act
        store.add("MyApp", r"D:\new\myapp.exe").unwrap();

        // Assert
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("MyApp").as_deref(), Some(r"D:\new\myapp.exe"));
    }

    #[test]
    fn names_are_case_insensitive() {
        let mut store = MemoryStore::new();
        store.add("MyApp", MYAPP).unwrap();

        assert!(store.exists("myapp"));
        store.add("MYAPP", r"D:\x.exe").unwrap();
        assert_eq!(store.len(), 1);
        // Original casing of the name is kept.
        assert_eq!(store.list().unwrap()[0].name, "MyApp");
    }

    #[test]
    fn list_is_sorted_by_name_ignoring_case() {
        // Arrange
        let mut store = MemoryStore::new();
        store.add("zeta", r"C:\z.exe").unwrap();
        store.add("Alpha", r"C:\a.exe").unwrap();
        store.add("beta", r"C:\b.exe").unwrap();

        // Act
        let names: Vec<String> = store.list().unwrap().into_iter().map(|e| e.name).collect();

        // Assert
        assert_eq!(names, ["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn read_only_store_rejects_mutations() {
        // Arrange
        let mut store = MemoryStore::read_only([StartupEntry::new("MyApp", MYAPP)]);

        // Act
        let added = store.add("Other", r"C:\other.exe");
        let removed = store.remove("MyApp");

        // Assert
        assert!(matches!(added, Err(StoreError::Os(_))));
        assert!(matches!(removed, Err(StoreError::Os(_))));
        assert!(store.exists("MyApp"));
        assert!(!store.exists("Other"));
    }

    #[test]
    fn boxed_store_delegates() {
        let mut store: Box<dyn StartupStore> = Box::new(MemoryStore::new());

        store.add("MyApp", MYAPP).unwrap();

        assert!(store.exists("MyApp"));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn not_found_error_names_the_entry() {
        let err = StoreError::NotFound("MyApp".into());

        assert_eq!(err.to_string(), "MyApp is not in startup");
    }
}
