/// Opens the startup form and blocks until it is closed.
#[cfg(windows)]
pub fn execute() {
    let store = super::open_store();
    // Double-clicked from Explorer: drop the console Windows opened for us.
    if startup_manager_windows::detach_owned_console() {
        startup_manager_core::log_debug!("released the launch console");
    }
    if let Err(e) = startup_manager_windows::run(store) {
        super::fail(&format!("could not open the startup form: {e}"));
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::fail("the startup form is only available on Windows");
}
