use serde::{Deserialize, Serialize};

/// A single auto-launch registration: the value name under the Run key
/// and the executable path stored as its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupEntry {
    pub name: String,
    pub path: String,
}

impl StartupEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Derives the suggested entry name for an executable path: the file
/// name with its last extension removed.
///
/// Both `\` and `/` are treated as separators because the native file
/// picker may return either. Dot-files keep their full name.
pub fn default_name(path: &str) -> String {
    let file = path.rsplit(['\\', '/']).next().unwrap_or(path);
    match file.rfind('.') {
        Some(0) | None => file.to_string(),
        Some(dot) => file[..dot].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_strips_directory_and_extension() {
        assert_eq!(default_name(r"C:\tools\myapp.exe"), "myapp");
        assert_eq!(default_name("C:/Program Files/Foo/foo.exe"), "foo");
    }

    #[test]
    fn default_name_only_strips_last_extension() {
        assert_eq!(default_name(r"C:\bin\archive.tar.exe"), "archive.tar");
    }

    #[test]
    fn default_name_keeps_names_without_extension() {
        assert_eq!(default_name(r"C:\bin\runner"), "runner");
        assert_eq!(default_name(r"C:\bin\.hidden"), ".hidden");
    }

    #[test]
    fn entry_serializes_to_json_object() {
        // Arrange
        let entry = StartupEntry::new("MyApp", r"C:\tools\myapp.exe");

        // Act
        let json = serde_json::to_string(&entry).unwrap();

        // Assert
        assert_eq!(json, r#"{"name":"MyApp","path":"C:\\tools\\myapp.exe"}"#);
    }
}
