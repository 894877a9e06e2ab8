mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "startup-manager",
    version,
    about = "Register applications to launch at Windows logon",
    long_about = "Register applications to launch at Windows logon.\n\n\
                  Run without a subcommand to open the startup form."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the startup form (the default)
    Gui,
    /// Register an application to launch at logon
    Add {
        /// Entry name, unique among startup entries
        name: String,
        /// Path to the executable
        path: String,
        /// Replace an existing entry with the same name
        #[arg(long)]
        force: bool,
    },
    /// Stop an application from launching at logon
    Remove {
        /// Entry name
        name: String,
    },
    /// Show whether an application is registered
    Check {
        /// Entry name
        name: String,
    },
    /// List all startup entries
    List {
        /// Print entries as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Create the default configuration file
    Init,
}

fn main() {
    let cli = Cli::parse();

    let config = startup_manager_core::config::load();
    startup_manager_core::log::init(&config.logging);

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => commands::gui::execute(),
        Commands::Add { name, path, force } => commands::add::execute(&name, &path, force),
        Commands::Remove { name } => commands::remove::execute(&name),
        Commands::Check { name } => commands::check::execute(&name),
        Commands::List { json } => commands::list::execute(json),
        Commands::Init => commands::init::execute(),
    }
}
