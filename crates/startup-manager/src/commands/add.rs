use startup_manager_core::{StartupStore, log_error, log_info};

/// Registers `path` under `name`.
///
/// Unlike the form, an existing entry is only replaced with `--force`
/// since there is nobody to ask.
pub fn execute(name: &str, path: &str, force: bool) {
    let mut store = super::open_store();
    match add(store.as_mut(), name, path, force) {
        Ok(message) => println!("{message}"),
        Err(e) => super::fail(&e),
    }
}

fn add(store: &mut dyn StartupStore, name: &str, path: &str, force: bool) -> Result<String, String> {
    if name.trim().is_empty() || path.trim().is_empty() {
        return Err("an application path and name are required".into());
    }

    let replacing = store.exists(name);
    if replacing && !force {
        return Err(format!(
            "{name} is already in startup (use --force to update it)"
        ));
    }

    if let Err(e) = store.add(name, path) {
        log_error!("error adding {name} to startup: {e}");
        return Err(format!("failed to add {name} to startup: {e}"));
    }
    log_info!("added {name} -> {path}");

    if replacing {
        Ok(format!("{name} has been updated in startup."))
    } else {
        Ok(format!("{name} has been added to startup!"))
    }
}
