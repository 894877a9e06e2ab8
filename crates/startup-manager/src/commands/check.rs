use startup_manager_core::StartupStore;

/// Reports whether `name` is registered. Exits with status 1 if not, so
/// scripts can test for it.
pub fn execute(name: &str) {
    let store = super::open_store();
    let (registered, message) = check(store.as_ref(), name);
    println!("{message}");
    if !registered {
        std::process::exit(1);
    }
}

fn check(store: &dyn StartupStore, name: &str) -> (bool, String) {
    if !store.exists(name) {
        return (false, format!("{name} is not in startup."));
    }
    match store.get(name) {
        Some(path) => (true, format!("{name} is in startup: {path}")),
        None => (true, format!("{name} is in startup.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use startup_manager_core::MemoryStore;

    #[test]
    fn registered_entry_shows_path() {
        // Arrange
        let mut store = MemoryStore::new();
        store.add("MyApp", r"C:\tools\myapp.exe").unwrap();

        // Act
        let (registered, message) = check(&store, "MyApp");

        // Assert
        assert!(registered);
        assert_eq!(message, r"MyApp is in startup: C:\tools\myapp.exe");
    }

    #[test]
    fn unknown_entry_is_not_registered() {
        let store = MemoryStore::new();

        let (registered, message) = check(&store, "MyApp");

        assert!(!registered);
        assert_eq!(message, "MyApp is not in startup.");
    }

    #[test]
    fn name_is_matched_as_typed() {
        // Arrange
        let mut store = MemoryStore::new();
        store.add("MyApp ", r"C:\tools\myapp.exe").unwrap();

        // Act
        let (padded, _) = check(&store, "MyApp ");
        let (bare, _) = check(&store, "MyApp");

        // Assert
        assert!(padded);
        assert!(!bare);
    }
}
