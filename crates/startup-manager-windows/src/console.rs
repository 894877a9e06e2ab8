//! Console handling for the form.
//!
//! The binary is a console program so the subcommands can print. Started
//! from Explorer it gets a console of its own, which would sit behind the
//! form for as long as it is open.

use windows::Win32::System::Console::{FreeConsole, GetConsoleProcessList};

use startup_manager_core::log_debug;

/// Releases the console if no other process is attached to it.
///
/// Returns true when the console was released. A console shared with a
/// shell is left alone so its prompt keeps working.
pub fn detach_owned_console() -> bool {
    let mut attached = [0u32; 2];
    // SAFETY: the buffer is valid for its whole length.
    let count = unsafe { GetConsoleProcessList(&mut attached) };
    if !is_sole_owner(count) {
        return false;
    }
    // SAFETY: no handles to the console are held past this point.
    match unsafe { FreeConsole() } {
        Ok(()) => true,
        Err(e) => {
            log_debug!("could not release the console: {e}");
            false
        }
    }
}

/// A count of zero means there is no console at all.
fn is_sole_owner(attached_processes: u32) -> bool {
    attached_processes == 1
}
