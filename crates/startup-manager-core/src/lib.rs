pub mod config;
pub mod entry;
pub mod form;
pub mod log;
pub mod store;

pub use config::Config;
pub use entry::{StartupEntry, default_name};
pub use form::{Dialogs, FormController, FormEvent, FormFields, Outcome};
pub use store::{MemoryStore, RUN_KEY, StartupStore, StoreError};
