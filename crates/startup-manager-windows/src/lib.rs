//! Windows implementation of Startup Manager.
//!
//! Everything here talks to Win32 directly and is only compiled on
//! Windows; other targets get an empty crate.
#![cfg(windows)]

/// Releasing a console the process does not share.
pub mod console;

/// Native file-picker and message-box dialogs.
pub mod dialogs;

/// The startup form window and its message loop.
pub mod form_window;

/// Startup entries in the HKCU Run registry key.
pub mod registry;

pub use console::detach_owned_console;
pub use dialogs::NativeDialogs;
pub use form_window::run;
pub use registry::RegistryStore;

/// Encodes a string as a null-terminated UTF-16 buffer for Win32 calls.
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
