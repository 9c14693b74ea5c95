use std::env;

/// Runtime configuration, read once at startup from the environment.
pub struct Config {
    pub discord_token: String,
    /// Prefix for legacy text commands. Bare aliases are accepted too.
    pub command_prefix: String,
    /// When false (the default), text command aliases match case-insensitively.
    pub case_sensitive_commands: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            discord_token: env::var("DISCORD_TOKEN").expect("Missing DISCORD_TOKEN"),
            command_prefix: env::var("COMMAND_PREFIX").unwrap_or_else(|_| "-".to_string()),
            case_sensitive_commands: env::var("CASE_SENSITIVE_COMMANDS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            command_prefix: "-".to_string(),
            case_sensitive_commands: false,
        }
    }
}
