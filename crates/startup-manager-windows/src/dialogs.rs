use startup_manager_core::{Dialogs, log_warn};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Controls::Dialogs::{
    COMMON_DLG_ERRORS, CommDlgExtendedError, FNERR_BUFFERTOOSMALL, GetOpenFileNameW,
    OFN_FILEMUSTEXIST, OFN_HIDEREADONLY, OFN_NOCHANGEDIR, OFN_PATHMUSTEXIST,
    OPENFILENAMEW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    IDYES, MB_ICONERROR, MB_ICONINFORMATION, MB_ICONQUESTION, MB_OK, MB_YESNO, MESSAGEBOX_STYLE,
    MessageBoxW,
};
use windows::core::{PCWSTR, PWSTR};

use crate::to_wide;

/// Picker buffer size in characters. A longer selection makes
/// `GetOpenFileNameW` fail with `FNERR_BUFFERTOOSMALL` instead of
/// returning a path.
const MAX_PATH_CHARS: usize = 32_768;

/// Picker filter pairs, double-null terminated.
const EXE_FILTER: &str = "Executable files\0*.exe\0All files\0*.*\0\0";

/// Explains why the picker returned nothing. `None` when the user simply
/// cancelled.
fn picker_failure(code: COMMON_DLG_ERRORS) -> Option<&'static str> {
    match code {
        COMMON_DLG_ERRORS(0) => None,
        FNERR_BUFFERTOOSMALL => Some("The selected path is too long."),
        _ => Some("The file picker could not be opened."),
    }
}

/// Common dialogs owned by the form window, so they stay modal to it.
pub struct NativeDialogs {
    owner: HWND,
}

impl NativeDialogs {
    pub fn new(owner: HWND) -> Self {
        Self { owner }
    }

    fn message_box(&self, title: &str, message: &str, style: MESSAGEBOX_STYLE) -> bool {
        let wide_title = to_wide(title);
        let wide_message = to_wide(message);
        // SAFETY: both strings are null-terminated and outlive the call.
        let result = unsafe {
            MessageBoxW(
                Some(self.owner),
                PCWSTR(wide_message.as_ptr()),
                PCWSTR(wide_title.as_ptr()),
                style,
            )
        };
        result == IDYES
    }
}

impl Dialogs for NativeDialogs {
    fn pick_executable(&mut self) -> Option<String> {
        let filter: Vec<u16> = EXE_FILTER.encode_utf16().collect();
        let title = to_wide("Select Application");
        let mut file = vec![0u16; MAX_PATH_CHARS];

        let mut ofn = OPENFILENAMEW {
            lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
            hwndOwner: self.owner,
            lpstrFilter: PCWSTR(filter.as_ptr()),
            nFilterIndex: 1,
            lpstrFile: PWSTR(file.as_mut_ptr()),
            nMaxFile: file.len() as u32,
            lpstrTitle: PCWSTR(title.as_ptr()),
            Flags: OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_HIDEREADONLY | OFN_NOCHANGEDIR,
            ..Default::default()
        };

        // SAFETY: every pointer in `ofn` refers to a buffer that lives
        // until after the call returns.
        let picked = unsafe { GetOpenFileNameW(&mut ofn) }.as_bool();
        if !picked {
            // SAFETY: reads the error left by the picker call above.
            let code = unsafe { CommDlgExtendedError() };
            if let Some(message) = picker_failure(code) {
                log_warn!("file picker failed: {message} (code {:#x})", code.0);
                self.show_error("Error", message);
            }
            return None;
        }

        let end = file.iter().position(|&c| c == 0).unwrap_or(file.len());
        Some(String::from_utf16_lossy(&file[..end]))
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.message_box(title, message, MB_YESNO | MB_ICONQUESTION)
    }

    fn show_info(&mut self, title: &str, message: &str) {
        self.message_box(title, message, MB_OK | MB_ICONINFORMATION);
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.message_box(title, message, MB_OK | MB_ICONERROR);
    }
}
