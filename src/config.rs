use std::env;

const DEFAULT_PREFIX: &str = "!";

/// Process configuration, read from the environment. A `.env` file in the
/// working directory is honoured when present.
pub struct Config {
    pub discord_token: String,
    pub command_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN is not set; put it in the environment or a .env file")?;
        let command_prefix = prefix_or_default(env::var("COMMAND_PREFIX").ok());

        Ok(Self {
            discord_token,
            command_prefix,
        })
    }
}

fn prefix_or_default(value: Option<String>) -> String {
    value
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
}
