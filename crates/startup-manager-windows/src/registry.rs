//! Startup entries stored under
//! `HKEY_CURRENT_USER\Software\Microsoft\Windows\CurrentVersion\Run`.
//!
//! Each value name is an entry name and its `REG_SZ` data is the path
//! that Windows launches on user logon. No elevation is required since
//! HKCU is per-user. The key is opened for every call and closed again
//! when the [`RunKey`] guard drops, on success and failure alike.

use startup_manager_core::{RUN_KEY, StartupEntry, StartupStore, StoreError, log_debug};
use windows::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_NO_MORE_ITEMS, WIN32_ERROR,
};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_EXPAND_SZ, REG_SAM_FLAGS, REG_SZ,
    REG_VALUE_TYPE, RegCloseKey, RegDeleteValueW, RegEnumValueW, RegOpenKeyExW, RegQueryValueExW,
    RegSetValueExW,
};
use windows::core::{PCWSTR, PWSTR};

use crate::to_wide;

/// Longest value name the registry allows, plus the terminator.
const MAX_VALUE_NAME: usize = 16_384;

/// [`StartupStore`] backed by the per-user Run key.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryStore;

impl RegistryStore {
    pub fn new() -> Self {
        Self
    }
}

impl StartupStore for RegistryStore {
    fn exists(&self, name: &str) -> bool {
        let Ok(key) = RunKey::open(KEY_QUERY_VALUE) else {
            return false;
        };
        key.query(name).is_ok()
    }

    fn get(&self, name: &str) -> Option<String> {
        RunKey::open(KEY_QUERY_VALUE).ok()?.read_string(name)
    }

    fn add(&mut self, name: &str, path: &str) -> Result<(), StoreError> {
        RunKey::open(KEY_SET_VALUE)?.set_string(name, path)
    }

    fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        RunKey::open(KEY_SET_VALUE)?.delete(name)
    }

    fn list(&self) -> Result<Vec<StartupEntry>, StoreError> {
        let key = RunKey::open(KEY_QUERY_VALUE)?;
        let mut entries: Vec<StartupEntry> = key
            .value_names()?
            .into_iter()
            .filter_map(|name| {
                let path = key.read_string(&name)?;
                Some(StartupEntry { name, path })
            })
            .collect();
        entries.sort_by_key(|e| e.name.to_lowercase());
        Ok(entries)
    }
}

/// An open handle to the Run key, closed on drop.
struct RunKey(HKEY);

impl RunKey {
    /// Opens the HKCU Run key with the given access rights.
    fn open(access: REG_SAM_FLAGS) -> Result<Self, StoreError> {
        let wide_key = to_wide(RUN_KEY);
        let mut key = HKEY::default();
        // SAFETY: RegOpenKeyExW is a standard Win32 registry API. We pass a
        // null-terminated subkey and a valid out pointer; the handle is
        // owned by the returned guard.
        let status = unsafe {
            RegOpenKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(wide_key.as_ptr()),
                None,
                access,
                &mut key,
            )
        };
        if status.is_err() {
            return Err(os_error("could not open registry key", status));
        }
        Ok(Self(key))
    }

    /// Queries a value's type and data size without reading it.
    fn query(&self, name: &str) -> Result<(REG_VALUE_TYPE, u32), WIN32_ERROR> {
        let wide_name = to_wide(name);
        let mut kind = REG_VALUE_TYPE::default();
        let mut size = 0u32;
        // SAFETY: A null data buffer makes RegQueryValueExW report only the
        // type and required size.
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                PCWSTR(wide_name.as_ptr()),
                None,
                Some(&mut kind),
                None,
                Some(&mut size),
            )
        };
        if status.is_err() {
            return Err(status);
        }
        Ok((kind, size))
    }

    /// Reads a string value. Non-string values read as `None`.
    fn read_string(&self, name: &str) -> Option<String> {
        let (kind, size) = self.query(name).ok()?;
        if kind != REG_SZ && kind != REG_EXPAND_SZ {
            return None;
        }

        let wide_name = to_wide(name);
        // Round up and leave room for a terminator the stored data may lack.
        let mut buffer = vec![0u16; (size as usize).div_ceil(2) + 1];
        let mut byte_len = (buffer.len() * 2) as u32;
        // SAFETY: `buffer` is at least `byte_len` bytes long.
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                PCWSTR(wide_name.as_ptr()),
                None,
                None,
                Some(buffer.as_mut_ptr().cast()),
                Some(&mut byte_len),
            )
        };
        if status.is_err() {
            return None;
        }

        let chars = (byte_len as usize / 2).min(buffer.len());
        let value = &buffer[..chars];
        let end = value.iter().position(|&c| c == 0).unwrap_or(value.len());
        Some(String::from_utf16_lossy(&value[..end]))
    }

    /// Writes a REG_SZ value.
    fn set_string(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let wide_name = to_wide(name);
        let wide_value = to_wide(value);
        // SAFETY: reinterpreting a &[u16] as &[u8] is safe; the layout is
        // contiguous and we compute the correct byte length.
        let bytes: &[u8] =
            unsafe { std::slice::from_raw_parts(wide_value.as_ptr().cast(), wide_value.len() * 2) };
        // SAFETY: RegSetValueExW is a standard Win32 registry API. The data
        // includes the terminating null as REG_SZ requires.
        let status =
            unsafe { RegSetValueExW(self.0, PCWSTR(wide_name.as_ptr()), None, REG_SZ, Some(bytes)) };
        if status.is_err() {
            return Err(os_error(&format!("could not write {name}"), status));
        }
        log_debug!("registry: set {name}");
        Ok(())
    }

    /// Deletes a value. A missing value is [`StoreError::NotFound`].
    fn delete(&self, name: &str) -> Result<(), StoreError> {
        let wide_name = to_wide(name);
        // SAFETY: RegDeleteValueW is a standard Win32 registry API.
        let status = unsafe { RegDeleteValueW(self.0, PCWSTR(wide_name.as_ptr())) };
        if status == ERROR_FILE_NOT_FOUND {
            return Err(StoreError::NotFound(name.to_string()));
        }
        if status.is_err() {
            return Err(os_error(&format!("could not delete {name}"), status));
        }
        log_debug!("registry: deleted {name}");
        Ok(())
    }

    /// Names of every value under the key, in registry order.
    fn value_names(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        let mut buffer = vec![0u16; MAX_VALUE_NAME];
        for index in 0.. {
            let mut len = buffer.len() as u32;
            // SAFETY: `len` holds the capacity of `buffer` in characters;
            // type and data are not requested.
            let status = unsafe {
                RegEnumValueW(
                    self.0,
                    index,
                    PWSTR(buffer.as_mut_ptr()),
                    &mut len,
                    None,
                    None,
                    None,
                    None,
                )
            };
            if status == ERROR_NO_MORE_ITEMS {
                break;
            }
            if status.is_err() {
                return Err(os_error("could not enumerate registry values", status));
            }
            names.push(String::from_utf16_lossy(&buffer[..len as usize]));
        }
        Ok(names)
    }
}

impl Drop for RunKey {
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful RegOpenKeyExW and is
        // closed exactly once.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

fn os_error(context: &str, status: WIN32_ERROR) -> StoreError {
    let reason = match status {
        ERROR_ACCESS_DENIED => "access is denied".to_string(),
        ERROR_FILE_NOT_FOUND => "not found".to_string(),
        other => format!("Win32 error {}", other.0),
    };
    StoreError::Os(format!("{context}: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Removes the test value even when an assertion fails part-way.
    struct Cleanup(String);

    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = RegistryStore::new().remove(&self.0);
        }
    }

    fn unique_name(test: &str) -> Cleanup {
        Cleanup(format!("startup-manager-test-{test}-{}", std::process::id()))
    }

    #[test]
    fn add_get_list_remove_round_trip() {
        // Arrange
        let cleanup = unique_name("cycle");
        let name = cleanup.0.as_str();
        let path = r"C:\tools\myapp.exe";
        let mut store = RegistryStore::new();
        assert!(!store.exists(name));

        // Act
        store.add(name, path).unwrap();

        // Assert
        assert!(store.exists(name));
        assert_eq!(store.get(name).as_deref(), Some(path));
        let listed = store.list().unwrap();
        assert!(listed.contains(&StartupEntry::new(name, path)));

        store.remove(name).unwrap();
        assert!(!store.exists(name));
        assert_eq!(store.get(name), None);
    }

    #[test]
    fn removing_missing_value_is_not_found() {
        // Arrange
        let cleanup = unique_name("missing");
        let name = cleanup.0.as_str();
        let mut store = RegistryStore::new();

        // Act
        let result = store.remove(name);

        // Assert
        assert_eq!(result, Err(StoreError::NotFound(name.to_string())));
    }

    #[test]
    fn second_remove_fails_after_first_succeeds() {
        let cleanup = unique_name("twice");
        let name = cleanup.0.as_str();
        let mut store = RegistryStore::new();
        store.add(name, r"C:\tools\myapp.exe").unwrap();

        store.remove(name).unwrap();
        let again = store.remove(name);

        assert!(matches!(again, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn overwrite_replaces_stored_path() {
        // Arrange
        let cleanup = unique_name("overwrite");
        let name = cleanup.0.as_str();
        let mut store = RegistryStore::new();
        store.add(name, r"C:\old\myapp.exe").unwrap();

        // Act
        store.add(name, r"D:\new\myapp.exe").unwrap();

        // Assert
        assert_eq!(store.get(name).as_deref(), Some(r"D:\new\myapp.exe"));
    }

    #[test]
    fn long_and_non_ascii_paths_read_back_intact() {
        // Arrange
        let cleanup = unique_name("long");
        let name = cleanup.0.as_str();
        let path = format!(r"C:\Programme\Überprüfung\{}\app.exe", "x".repeat(300));
        let mut store = RegistryStore::new();

        // Act
        store.add(name, &path).unwrap();

        // Assert
        assert_eq!(store.get(name), Some(path));
    }

    #[test]
    fn name_with_trailing_space_is_distinct() {
        // Arrange
        let cleanup = unique_name("space");
        let padded = format!("{} ", cleanup.0);
        let _padded_cleanup = Cleanup(padded.clone());
        let mut store = RegistryStore::new();

        // Act
        store.add(&padded, r"C:\tools\myapp.exe").unwrap();

        // Assert
        assert!(store.exists(&padded));
        assert!(!store.exists(&cleanup.0));
        store.remove(&padded).unwrap();
        assert!(!store.exists(&padded));
    }
}
