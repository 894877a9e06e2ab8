use startup_manager_core::{StartupStore, StoreError, log_error, log_info};

/// Unregisters `name`.
pub fn execute(name: &str) {
    let mut store = super::open_store();
    match remove(store.as_mut(), name) {
        Ok(message) => println!("{message}"),
        Err(e) => super::fail(&e),
    }
}

fn remove(store: &mut dyn StartupStore, name: &str) -> Result<String, String> {
    if name.trim().is_empty() {
        return Err("an application name is required".into());
    }

    match store.remove(name) {
        Ok(()) => {
            log_info!("removed {name}");
            Ok(format!("{name} has been removed from startup!"))
        }
        Err(StoreError::NotFound(_)) => Err(format!("{name} is not in startup.")),
        Err(e) => {
            log_error!("error removing {name} from startup: {e}");
            Err(format!("failed to remove {name} from startup: {e}"))
        }
    }
}
