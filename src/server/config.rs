use std::collections::HashMap;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::category_group::CategoryGroup,
};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_WEB_BASE_URL: &str = "http://localhost:8080";

/// A channel that receives new apprenticeship announcements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnouncementChannel {
    pub guild_id: u64,
    pub channel_id: u64,
}

#[derive(Clone)]
pub struct Config {
    pub discord_bot_token: String,
    /// Discord id of the bot owner, the only user allowed to run owner-only commands.
    pub owner_id: u64,

    pub database_url: String,
    pub bind_address: String,
    /// Public address of the web server, used in links sent to Discord users.
    pub web_base_url: String,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    pub apprenticeship_channels: Vec<AnnouncementChannel>,
    /// Roles mentioned on every apprenticeship announcement.
    pub roles_to_ping: Vec<u64>,
    /// Extra roles mentioned when a new listing falls in a category group.
    pub category_group_roles: HashMap<CategoryGroup, Vec<u64>>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, or `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and well formed
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable could not be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let owner_id = parse_id("OWNER_ID", &required("OWNER_ID")?)?;

        Ok(Self {
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            owner_id,
            database_url: required("DATABASE_URL")?,
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            web_base_url: lookup("WEB_BASE_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_WEB_BASE_URL.to_string()),
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            apprenticeship_channels: parse_channel_list(
                &lookup("APPRENTICESHIP_CHANNELS").unwrap_or_default(),
            )?,
            roles_to_ping: parse_id_list(
                "ROLES_TO_PING",
                &lookup("ROLES_TO_PING").unwrap_or_default(),
            )?,
            category_group_roles: parse_group_roles(
                &lookup("CATEGORY_GROUP_ROLES").unwrap_or_default(),
            )?,
        })
    }
}

fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: format!("'{}' is not a Discord id: {}", value.trim(), e),
        })
}

/// Parses a comma separated list of ids, ignoring empty entries.
fn parse_id_list(name: &str, value: &str) -> Result<Vec<u64>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_id(name, s))
        .collect()
}

/// Parses `guild:channel,guild:channel`.
fn parse_channel_list(value: &str) -> Result<Vec<AnnouncementChannel>, ConfigError> {
    const NAME: &str = "APPRENTICESHIP_CHANNELS";

    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (guild, channel) = pair.split_once(':').ok_or_else(|| ConfigError::InvalidEnvVar {
                name: NAME.to_string(),
                reason: format!("'{}' is not in guild:channel form", pair),
            })?;

            Ok(AnnouncementChannel {
                guild_id: parse_id(NAME, guild)?,
                channel_id: parse_id(NAME, channel)?,
            })
        })
        .collect()
}

/// Parses `GROUP=id|id;GROUP=id` where `GROUP` is a category group name.
fn parse_group_roles(value: &str) -> Result<HashMap<CategoryGroup, Vec<u64>>, ConfigError> {
    const NAME: &str = "CATEGORY_GROUP_ROLES";

    let mut roles = HashMap::new();

    for entry in value.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (group, ids) = entry.split_once('=').ok_or_else(|| ConfigError::InvalidEnvVar {
            name: NAME.to_string(),
            reason: format!("'{}' is not in GROUP=id form", entry),
        })?;

        let group = CategoryGroup::from_name(group.trim()).ok_or_else(|| {
            ConfigError::InvalidEnvVar {
                name: NAME.to_string(),
                reason: format!("unknown category group '{}'", group.trim()),
            }
        })?;

        let ids = ids
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| parse_id(NAME, s))
            .collect::<Result<Vec<u64>, ConfigError>>()?;

        roles.entry(group).or_insert_with(Vec::new).extend(ids);
    }

    Ok(roles)
}
