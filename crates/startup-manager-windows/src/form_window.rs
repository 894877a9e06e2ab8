//! The fixed-size startup form.
//!
//! Plain Win32 child controls on a non-resizable top-level window. Button
//! clicks arrive as `WM_COMMAND` and are handed to the
//! [`FormController`] together with the text currently in the fields.

use std::cell::RefCell;

use startup_manager_core::form::STATUS_READY;
use startup_manager_core::{
    FormController, FormEvent, FormFields, Outcome, StartupStore, log_debug, log_info,
};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    COLOR_BTNFACE, CreateFontW, DEFAULT_GUI_FONT, DeleteObject, FONT_CHARSET, FONT_CLIP_PRECISION,
    FONT_OUTPUT_PRECISION, FONT_QUALITY, GetDC, GetDeviceCaps, GetStockObject, GetSysColorBrush,
    HFONT, HGDIOBJ, LOGPIXELSY, ReleaseDC, UpdateWindow,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::SetFocus;
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW, DispatchMessageW,
    ES_AUTOHSCROLL, GetMessageW, GetWindowTextLengthW, GetWindowTextW, HMENU, IDC_ARROW,
    IsDialogMessageW, LoadCursorW, MSG, PostQuitMessage, RegisterClassW, SW_SHOW, SendMessageW,
    SetWindowTextW, ShowWindow, TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE, WM_COMMAND,
    WM_DESTROY, WM_SETFONT, WNDCLASSW, WS_BORDER, WS_CAPTION, WS_CHILD, WS_EX_CLIENTEDGE,
    WS_EX_STATICEDGE, WS_MINIMIZEBOX, WS_OVERLAPPED, WS_SYSMENU, WS_TABSTOP, WS_VISIBLE,
};
use windows::core::{PCWSTR, w};

use crate::dialogs::NativeDialogs;
use crate::to_wide;

const CLIENT_WIDTH: i32 = 400;
const CLIENT_HEIGHT: i32 = 300;

const HEADING_FACE: &str = "Arial";
const HEADING_POINTS: i32 = 14;

const ID_HEADING: i32 = 100;
const ID_PATH: i32 = 101;
const ID_BROWSE: i32 = 102;
const ID_NAME: i32 = 103;
const ID_ADD: i32 = 104;
const ID_REMOVE: i32 = 105;

/// `WM_COMMAND` notification code for a button click.
const BN_CLICKED: usize = 0;

struct FormState {
    controller: FormController<Box<dyn StartupStore>, NativeDialogs>,
    path_edit: HWND,
    name_edit: HWND,
}

thread_local! {
    static FORM: RefCell<Option<FormState>> = const { RefCell::new(None) };
}

/// One child control of the form.
struct Control {
    class: PCWSTR,
    text: &'static str,
    ex_style: WINDOW_EX_STYLE,
    style: WINDOW_STYLE,
    bounds: (i32, i32, i32, i32),
    id: i32,
}

/// Shows the form and runs its message loop until the window closes.
pub fn run(store: Box<dyn StartupStore>) -> Result<(), Box<dyn std::error::Error>> {
    // SAFETY: a null module name returns the handle of the running exe.
    let instance: HINSTANCE = unsafe { GetModuleHandleW(None)? }.into();
    let class_name = w!("StartupManagerForm");

    // SAFETY: the class name is a static wide string and the window
    // procedure matches the WNDPROC signature.
    unsafe {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(form_wnd_proc),
            hInstance: instance,
            lpszClassName: class_name,
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: GetSysColorBrush(COLOR_BTNFACE),
            ..Default::default()
        };
        if RegisterClassW(&wc) == 0 {
            return Err("could not register the form window class".into());
        }
    }

    // Caption and border but no sizing frame or maximize box.
    let style = WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX;
    let mut frame = RECT {
        left: 0,
        top: 0,
        right: CLIENT_WIDTH,
        bottom: CLIENT_HEIGHT,
    };
    // SAFETY: `frame` is a valid RECT for the duration of the call.
    unsafe { AdjustWindowRectEx(&mut frame, style, false, WINDOW_EX_STYLE::default())? };

    // SAFETY: the class was registered above; parent and menu are absent.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class_name,
            w!("Startup Manager"),
            style,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            frame.right - frame.left,
            frame.bottom - frame.top,
            None,
            None,
            Some(instance),
            None,
        )?
    };

    // SAFETY: DEFAULT_GUI_FONT is a stock object and never needs freeing.
    let font = unsafe { GetStockObject(DEFAULT_GUI_FONT) };
    let heading_font = create_heading_font();
    let label = WS_CHILD | WS_VISIBLE;
    let edit = WS_CHILD | WS_VISIBLE | WS_TABSTOP | WS_BORDER | WINDOW_STYLE(ES_AUTOHSCROLL as u32);
    let button = WS_CHILD | WS_VISIBLE | WS_TABSTOP;
    let none = WINDOW_EX_STYLE::default();

    let controls = [
        Control {
            class: w!("STATIC"),
            text: "Add Application to Startup",
            ex_style: none,
            style: label,
            bounds: (20, 10, 360, 28),
            id: ID_HEADING,
        },
        Control {
            class: w!("STATIC"),
            text: "Application Path:",
            ex_style: none,
            style: label,
            bounds: (20, 48, 360, 18),
            id: 0,
        },
        Control {
            class: w!("EDIT"),
            text: "",
            ex_style: WS_EX_CLIENTEDGE,
            style: edit,
            bounds: (20, 68, 276, 24),
            id: ID_PATH,
        },
        Control {
            class: w!("BUTTON"),
            text: "Browse",
            ex_style: none,
            style: button,
            bounds: (304, 67, 76, 26),
            id: ID_BROWSE,
        },
        Control {
            class: w!("STATIC"),
            text: "Application Name:",
            ex_style: none,
            style: label,
            bounds: (20, 106, 360, 18),
            id: 0,
        },
        Control {
            class: w!("EDIT"),
            text: "",
            ex_style: WS_EX_CLIENTEDGE,
            style: edit,
            bounds: (20, 126, 360, 24),
            id: ID_NAME,
        },
        Control {
            class: w!("BUTTON"),
            text: "Add to Startup",
            ex_style: none,
            style: button,
            bounds: (30, 176, 150, 32),
            id: ID_ADD,
        },
        Control {
            class: w!("BUTTON"),
            text: "Remove from Startup",
            ex_style: none,
            style: button,
            bounds: (220, 176, 150, 32),
            id: ID_REMOVE,
        },
        Control {
            class: w!("STATIC"),
            text: STATUS_READY,
            ex_style: WS_EX_STATICEDGE,
            style: label,
            bounds: (20, 262, 360, 22),
            id: 0,
        },
    ];

    let mut path_edit = HWND::default();
    let mut name_edit = HWND::default();
    for control in &controls {
        let control_font: HGDIOBJ = match control.id {
            ID_HEADING if !heading_font.is_invalid() => heading_font.into(),
            _ => font,
        };
        let child = create_control(hwnd, instance, control, control_font)?;
        match control.id {
            ID_PATH => path_edit = child,
            ID_NAME => name_edit = child,
            _ => {}
        }
    }

    FORM.with(|cell| {
        *cell.borrow_mut() = Some(FormState {
            controller: FormController::new(store, NativeDialogs::new(hwnd)),
            path_edit,
            name_edit,
        });
    });

    // SAFETY: `hwnd` and `path_edit` were created above on this thread.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
        let _ = SetFocus(Some(path_edit));
    }
    log_info!("form opened");

    run_message_loop(hwnd);

    FORM.with(|cell| cell.borrow_mut().take());
    if !heading_font.is_invalid() {
        // SAFETY: the window and its controls are destroyed, so nothing
        // still selects the font.
        let _ = unsafe { DeleteObject(heading_font.into()) };
    }
    log_info!("form closed");
    Ok(())
}

/// Pumps messages until `WM_QUIT`. Dialog navigation (Tab between
/// fields, Enter on buttons) is handled by `IsDialogMessageW`.
fn run_message_loop(hwnd: HWND) {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        if unsafe { IsDialogMessageW(hwnd, &msg).as_bool() } {
            continue;
        }
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// Character height in pixels for a font of `points` at `dpi`, negative
/// as `CreateFontW` expects for a character (not cell) height.
fn font_height(points: i32, dpi: i32) -> i32 {
    -((points * dpi + 36) / 72)
}

/// Arial 14pt for the form heading. An invalid handle means the font
/// could not be created and the heading keeps the GUI font.
fn create_heading_font() -> HFONT {
    let face = to_wide(HEADING_FACE);
    // SAFETY: the screen DC is released before returning and `face` is
    // null-terminated and outlives the call.
    unsafe {
        let screen_dc = GetDC(None);
        let dpi = GetDeviceCaps(Some(screen_dc), LOGPIXELSY);
        let _ = ReleaseDC(None, screen_dc);

        let font = CreateFontW(
            font_height(HEADING_POINTS, if dpi > 0 { dpi } else { 96 }),
            0,
            0,
            0,
            400,
            0,
            0,
            0,
            FONT_CHARSET(0),
            FONT_OUTPUT_PRECISION(0),
            FONT_CLIP_PRECISION(0),
            FONT_QUALITY(0),
            0,
            PCWSTR(face.as_ptr()),
        );
        if font.is_invalid() {
            log_debug!("could not create the {HEADING_FACE} heading font");
        }
        font
    }
}

fn create_control(
    parent: HWND,
    instance: HINSTANCE,
    control: &Control,
    font: HGDIOBJ,
) -> windows::core::Result<HWND> {
    let text = to_wide(control.text);
    let (x, y, width, height) = control.bounds;
    // SAFETY: `parent` is a live window; the id doubles as the child's
    // HMENU, which is how Win32 identifies child controls.
    unsafe {
        let child = CreateWindowExW(
            control.ex_style,
            control.class,
            PCWSTR(text.as_ptr()),
            control.style,
            x,
            y,
            width,
            height,
            Some(parent),
            Some(HMENU(control.id as isize as *mut _)),
            Some(instance),
            None,
        )?;
        SendMessageW(
            child,
            WM_SETFONT,
            Some(WPARAM(font.0 as usize)),
            Some(LPARAM(1)),
        );
        Ok(child)
    }
}

fn event_for(id: i32) -> Option<FormEvent> {
    match id {
        ID_BROWSE => Some(FormEvent::Browse),
        ID_ADD => Some(FormEvent::Add),
        ID_REMOVE => Some(FormEvent::Remove),
        _ => None,
    }
}

/// Runs a button's handler against the current field contents.
fn dispatch(event: FormEvent) {
    FORM.with(|cell| {
        // A modal dialog is already up for an earlier click.
        let Ok(mut slot) = cell.try_borrow_mut() else {
            return;
        };
        let Some(state) = slot.as_mut() else {
            return;
        };

        let mut fields = FormFields {
            path: read_text(state.path_edit),
            name: read_text(state.name_edit),
        };
        let outcome = state.controller.handle(event, &mut fields);
        log_debug!("{event:?} -> {outcome:?}");

        if outcome == Outcome::Selected {
            write_text(state.path_edit, &fields.path);
            write_text(state.name_edit, &fields.name);
        }
    });
}

fn read_text(hwnd: HWND) -> String {
    // SAFETY: GetWindowTextLengthW and GetWindowTextW only read the
    // control's text into our buffer.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length <= 0 {
            return String::new();
        }
        // +1 for the null terminator that Windows requires
        let mut buffer = vec![0u16; (length + 1) as usize];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }
}

fn write_text(hwnd: HWND, text: &str) {
    let wide = to_wide(text);
    // SAFETY: `wide` is null-terminated and outlives the call.
    unsafe {
        let _ = SetWindowTextW(hwnd, PCWSTR(wide.as_ptr()));
    }
}

unsafe extern "system" fn form_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_COMMAND => {
            let id = (wparam.0 & 0xFFFF) as i32;
            let code = (wparam.0 >> 16) & 0xFFFF;
            if code == BN_CLICKED {
                if let Some(event) = event_for(id) {
                    dispatch(event);
                    return LRESULT(0);
                }
            }
        }
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            return LRESULT(0);
        }
        _ => {}
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_font_height_at_standard_dpi() {
        assert_eq!(font_height(HEADING_POINTS, 96), -19);
    }

    #[test]
    fn heading_font_height_scales_with_dpi() {
        assert_eq!(font_height(HEADING_POINTS, 144), -28);
        assert_eq!(font_height(HEADING_POINTS, 192), -37);
    }

    #[test]
    fn only_buttons_map_to_events() {
        assert_eq!(event_for(ID_BROWSE), Some(FormEvent::Browse));
        assert_eq!(event_for(ID_ADD), Some(FormEvent::Add));
        assert_eq!(event_for(ID_REMOVE), Some(FormEvent::Remove));
        assert_eq!(event_for(ID_HEADING), None);
        assert_eq!(event_for(ID_PATH), None);
    }
}
