/// Generates the default `config.toml` contents with explanatory comments.
///
/// Used by `startup-manager init` to create a starter config file.
pub fn generate_config() -> String {
    r##"# Startup Manager configuration
# Location: ~/.config/startup-manager/config.toml

[logging]
# Enable file logging to ~/.config/startup-manager/logs/startup-manager.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation (1 to 100).
max_file_mb = 10
"##
    .to_string()
}
