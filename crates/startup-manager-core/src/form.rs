//! The startup form's behaviour, independent of any GUI toolkit.
//!
//! The window owns the widgets and forwards button clicks as
//! [`FormEvent`]s together with the current field contents. All user
//! interaction beyond the two fields goes through [`Dialogs`].

use crate::entry::default_name;
use crate::store::StartupStore;
use crate::{log_error, log_info, log_warn};

/// Text shown in the form's status bar.
pub const STATUS_READY: &str = "Ready";

const TITLE_ERROR: &str = "Error";
const TITLE_SUCCESS: &str = "Success";
const TITLE_EXISTS: &str = "Already exists";

/// Modal interactions the form needs from the platform.
pub trait Dialogs {
    /// Asks the user to pick an executable. `None` when cancelled.
    fn pick_executable(&mut self) -> Option<String>;
    /// Asks a yes/no question. Returns true on "yes".
    fn confirm(&mut self, title: &str, message: &str) -> bool;
    fn show_info(&mut self, title: &str, message: &str);
    fn show_error(&mut self, title: &str, message: &str);
}

/// Current contents of the path and name text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub path: String,
    pub name: String,
}

/// A button press on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Browse,
    Add,
    Remove,
}

/// What a handled event ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A file was picked and the fields were filled in.
    Selected,
    /// The user cancelled the picker or declined an overwrite.
    Cancelled,
    /// Required fields were empty; nothing was touched.
    Invalid,
    Added,
    Removed,
    /// Remove was requested for a name that is not registered.
    NotRegistered,
    /// The store rejected the operation.
    Failed,
}

/// Drives a [`StartupStore`] from form events.
pub struct FormController<S, D> {
    store: S,
    dialogs: D,
}

impl<S: StartupStore, D: Dialogs> FormController<S, D> {
    pub fn new(store: S, dialogs: D) -> Self {
        Self { store, dialogs }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    /// Dispatches a button press. Only [`FormEvent::Browse`] writes to
    /// `fields`.
    pub fn handle(&mut self, event: FormEvent, fields: &mut FormFields) -> Outcome {
        match event {
            FormEvent::Browse => self.browse(fields),
            FormEvent::Add => self.add(fields),
            FormEvent::Remove => self.remove(fields),
        }
    }

    /// Lets the user pick an executable and suggests a name for it.
    ///
    /// Cancelling leaves both fields untouched.
    pub fn browse(&mut self, fields: &mut FormFields) -> Outcome {
        let Some(path) = self.dialogs.pick_executable().filter(|p| !p.is_empty()) else {
            return Outcome::Cancelled;
        };
        fields.name = default_name(&path);
        fields.path = path;
        Outcome::Selected
    }

    /// Registers `fields.path` under `fields.name`, asking before
    /// replacing an existing entry.
    ///
    /// Both fields reach the store exactly as typed; whitespace only
    /// matters for deciding whether a field is empty.
    pub fn add(&mut self, fields: &FormFields) -> Outcome {
        let path = fields.path.as_str();
        let name = fields.name.as_str();
        if path.trim().is_empty() || name.trim().is_empty() {
            self.dialogs.show_error(
                TITLE_ERROR,
                "Please select an application and provide a name.",
            );
            return Outcome::Invalid;
        }

        if self.store.exists(name) {
            let question = format!("{name} is already in startup. Do you want to update it?");
            if !self.dialogs.confirm(TITLE_EXISTS, &question) {
                return Outcome::Cancelled;
            }
            if let Err(e) = self.store.remove(name) {
                log_warn!("could not remove previous entry {name}: {e}");
            }
        }

        match self.store.add(name, path) {
            Ok(()) => {
                log_info!("added {name} -> {path}");
                self.dialogs
                    .show_info(TITLE_SUCCESS, &format!("{name} has been added to startup!"));
                Outcome::Added
            }
            Err(e) => {
                log_error!("error adding {name} to startup: {e}");
                self.dialogs
                    .show_error(TITLE_ERROR, "Failed to add to startup.");
                Outcome::Failed
            }
        }
    }

    /// Unregisters `fields.name`. The path field is ignored.
    pub fn remove(&mut self, fields: &FormFields) -> Outcome {
        let name = fields.name.as_str();
        if name.trim().is_empty() {
            self.dialogs
                .show_error(TITLE_ERROR, "Please provide the application name.");
            return Outcome::Invalid;
        }

        if !self.store.exists(name) {
            self.dialogs
                .show_error(TITLE_ERROR, &format!("{name} is not in startup."));
            return Outcome::NotRegistered;
        }

        match self.store.remove(name) {
            Ok(()) => {
                log_info!("removed {name}");
                self.dialogs.show_info(
                    TITLE_SUCCESS,
                    &format!("{name} has been removed from startup!"),
                );
                Outcome::Removed
            }
            Err(e) => {
                log_error!("error removing {name} from startup: {e}");
                self.dialogs
                    .show_error(TITLE_ERROR, "Failed to remove from startup.");
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
