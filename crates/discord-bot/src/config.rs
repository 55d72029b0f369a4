//! Application configuration loaded from an optional config file and
//! environment variables.

use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Discord configuration
    pub discord: DiscordConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,

    /// Presence rotation configuration
    #[serde(default)]
    pub presence: PresenceConfig,

    /// Control panel configuration
    pub panel: PanelConfig,
}

#[derive(Debug, Deserialize)]
pub struct DiscordConfig {
    /// Bot token
    pub token: SecretString,

    /// Guild served by the control panel (defaults to the first guild joined)
    #[serde(default)]
    pub guild_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Command prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    /// Status strings to rotate through
    #[serde(default = "default_activities", deserialize_with = "activity_list")]
    pub activities: Vec<String>,

    /// Stream URL shown with the status
    #[serde(default = "default_stream_url")]
    pub url: String,

    /// Secondary status line
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Time between updates
    #[serde(default = "default_presence_interval", with = "humantime_serde")]
    pub interval: Duration,
}

#[derive(Debug, Deserialize)]
pub struct PanelConfig {
    /// Shared secret for the web form
    pub token: SecretString,

    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Static assets directory
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

// Default implementations
impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            activities: default_activities(),
            url: default_stream_url(),
            display_name: default_display_name(),
            interval: default_presence_interval(),
        }
    }
}

// Default value functions
fn default_prefix() -> String {
    "!".into()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_activities() -> Vec<String> {
    vec![
        "come watch me I'm cutie ^^".into(),
        "[EN] Art stream! Let's do some art!".into(),
        "Ima Die C: Dark souls = Death x-x no backseating / hints n tips unless i ask plz".into(),
        "[EN] Room tour!".into(),
    ]
}

fn default_stream_url() -> String {
    "https://www.twitch.tv/heyimyuki_".into()
}

fn default_display_name() -> String {
    "Heyimyuki_ on Twitch".into()
}

fn default_presence_interval() -> Duration {
    Duration::from_secs(10 * 60)
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    5665
}

fn default_public_dir() -> PathBuf {
    PathBuf::from(control_panel::DEFAULT_PUBLIC_DIR)
}

/// Accepts a list from a config file or a `|`-separated string from the
/// environment.
fn activity_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Activities {
        Joined(String),
        List(Vec<String>),
    }

    Ok(match Activities::deserialize(deserializer)? {
        Activities::Joined(joined) => joined.split('|').map(str::to_string).collect(),
        Activities::List(list) => list,
    })
}

/// Environment source: `SECTION__KEY=value`.
fn environment() -> config::Environment {
    config::Environment::default()
        .separator("__")
        // Keep snowflakes and tokens as strings.
        .try_parsing(false)
}

impl Config {
    /// Load configuration from `config.{toml,json,yaml}` (optional), `.env`
    /// and environment variables, in increasing precedence.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(environment())
            .build()
            .context("Failed to build configuration")?;

        Self::finish(config)
    }

    /// Load configuration from an explicit set of environment variables.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let config = config::Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .context("Failed to build configuration")?;

        Self::finish(config)
    }

    fn finish(config: config::Config) -> Result<Self> {
        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the bot cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.bot.prefix.is_empty() {
            bail!("bot.prefix must not be empty");
        }
        if self.bot.prefix.chars().any(char::is_whitespace) {
            bail!("bot.prefix must not contain whitespace");
        }
        if self.presence.activities.iter().all(|a| a.trim().is_empty()) {
            bail!("presence.activities must contain at least one entry");
        }
        if self.presence.interval.is_zero() {
            bail!("presence.interval must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![("DISCORD__TOKEN", "bot-token"), ("PANEL__TOKEN", "panel-token")]
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(required()).unwrap();

        assert_eq!(config.discord.token.expose_secret(), "bot-token");
        assert_eq!(config.panel.token.expose_secret(), "panel-token");
        assert!(config.discord.guild_id.is_none());
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.panel.port, 5665);
        assert!(config.panel.public_dir.is_absolute());
        assert!(config.panel.public_dir.join("style.css").is_file());
        assert!(config.panel.public_dir.join("app.js").is_file());
        assert_eq!(config.presence.activities.len(), 4);
        assert_eq!(config.presence.interval, Duration::from_secs(600));
    }

    #[test]
    fn test_overrides() {
        let mut vars = required();
        vars.extend([
            ("DISCORD__GUILD_ID", "123456789012345678"),
            ("BOT__PREFIX", "?"),
            ("PANEL__PORT", "8080"),
            ("PRESENCE__INTERVAL", "30s"),
            ("PRESENCE__ACTIVITIES", "one|two"),
        ]);
        let config = Config::from_vars(vars).unwrap();

        assert_eq!(config.discord.guild_id, Some(123456789012345678));
        assert_eq!(config.bot.prefix, "?");
        assert_eq!(config.panel.port, 8080);
        assert_eq!(config.presence.interval, Duration::from_secs(30));
        assert_eq!(config.presence.activities, vec!["one", "two"]);
    }

    #[test]
    fn test_single_activity() {
        let mut vars = required();
        vars.push(("PRESENCE__ACTIVITIES", "just chatting"));
        let config = Config::from_vars(vars).unwrap();
        assert_eq!(config.presence.activities, vec!["just chatting"]);
    }

    #[test]
    fn test_missing_token_fails() {
        assert!(Config::from_vars([("PANEL__TOKEN", "panel-token")]).is_err());
        assert!(Config::from_vars([("DISCORD__TOKEN", "bot-token")]).is_err());
    }

    #[test]
    fn test_secrets_are_redacted() {
        let config = Config::from_vars(required()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("bot-token"));
        assert!(!debug.contains("panel-token"));
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let mut config = Config::from_vars(required()).unwrap();
        config.bot.prefix = String::new();
        assert!(config.validate().is_err());

        config.bot.prefix = "! ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_rotation() {
        let mut config = Config::from_vars(required()).unwrap();
        config.presence.activities.clear();
        assert!(config.validate().is_err());

        let mut config = Config::from_vars(required()).unwrap();
        config.presence.interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
