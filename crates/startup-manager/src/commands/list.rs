use startup_manager_core::{StartupEntry, StartupStore};

/// Prints every startup entry, as a table or as JSON.
pub fn execute(json: bool) {
    let store = super::open_store();
    let entries = match store.list() {
        Ok(entries) => entries,
        Err(e) => super::fail(&format!("could not read startup entries: {e}")),
    };

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{text}"),
            Err(e) => super::fail(&e.to_string()),
        }
    } else {
        print!("{}", format_table(&entries));
    }
}

/// Formats entries as two aligned columns.
fn format_table(entries: &[StartupEntry]) -> String {
    if entries.is_empty() {
        return "No startup entries.\n".into();
    }
    let width = entries.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| format!("{:<width$}  {}\n", e.name, e.path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_says_so() {
        assert_eq!(format_table(&[]), "No startup entries.\n");
    }

    #[test]
    fn names_are_padded_to_the_longest() {
        // Arrange
        let entries = [
            StartupEntry::new("A", r"C:\a.exe"),
            StartupEntry::new("Longer", r"C:\longer.exe"),
        ];

        // Act
        let table = format_table(&entries);

        // Assert
        assert_eq!(table, "A       C:\\a.exe\nLonger  C:\\longer.exe\n");
    }
}
