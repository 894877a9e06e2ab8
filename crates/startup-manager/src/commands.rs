pub mod add;
pub mod check;
pub mod gui;
pub mod init;
pub mod list;
pub mod remove;

use startup_manager_core::StartupStore;

/// Opens the per-user startup store, exiting if this platform has none.
pub fn open_store() -> Box<dyn StartupStore> {
    match platform_store() {
        Ok(store) => store,
        Err(e) => fail(&e),
    }
}

#[cfg(windows)]
fn platform_store() -> Result<Box<dyn StartupStore>, String> {
    Ok(Box::new(startup_manager_windows::RegistryStore::new()))
}

#[cfg(not(windows))]
fn platform_store() -> Result<Box<dyn StartupStore>, String> {
    Err("startup entries are only supported on Windows".into())
}

/// Prints an error and exits with status 1.
pub fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}
