//! Interaction context and typed option access.

use std::collections::HashMap;

use serenity::all::{CommandDataOption, CommandDataOptionValue, CommandInteraction};

use crate::server::error::command::CommandError;

/// A supplied option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    User(u64),
    Channel(u64),
    Attachment(u64),
}

/// Everything a command needs to know about the interaction that invoked it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionContext {
    pub command: String,
    pub user_id: u64,
    pub user_name: String,
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    /// Name of the invoked subcommand, if the command has subcommands.
    pub subcommand: Option<String>,
    /// Option values keyed by name, taken from the subcommand when one was invoked.
    pub options: HashMap<String, OptionValue>,
}

impl InteractionContext {
    /// Converts a serenity command interaction.
    ///
    /// Option types the bot never declares (roles, numbers, mentionables) are dropped.
    pub fn from_interaction(interaction: &CommandInteraction) -> Self {
        let mut subcommand = None;
        let mut options = HashMap::new();

        for option in &interaction.data.options {
            match &option.value {
                CommandDataOptionValue::SubCommand(sub_options) => {
                    subcommand = Some(option.name.clone());
                    collect_options(sub_options, &mut options);
                }
                _ => collect_options(std::slice::from_ref(option), &mut options),
            }
        }

        Self {
            command: interaction.data.name.clone(),
            user_id: interaction.user.id.get(),
            user_name: interaction.user.name.clone(),
            guild_id: interaction.guild_id.map(|id| id.get()),
            channel_id: interaction.channel_id.get(),
            subcommand,
            options,
        }
    }

    /// Test and builder style constructor.
    pub fn new(command: impl Into<String>, user_id: u64) -> Self {
        Self {
            command: command.into(),
            user_id,
            user_name: format!("user-{}", user_id),
            ..Default::default()
        }
    }

    pub fn in_guild(mut self, guild_id: u64, channel_id: u64) -> Self {
        self.guild_id = Some(guild_id);
        self.channel_id = channel_id;
        self
    }

    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    /// Guild the command was used in.
    ///
    /// # Returns
    /// - `Err(CommandError::GuildOnly)` - The command was used in a direct message
    pub fn require_guild(&self) -> Result<u64, CommandError> {
        self.guild_id.ok_or(CommandError::GuildOnly)
    }

    fn get(&self, name: &str) -> Result<&OptionValue, CommandError> {
        self.options
            .get(name)
            .ok_or_else(|| CommandError::MissingOption(name.to_string()))
    }

    fn wrong_type(name: &str, expected: &'static str) -> CommandError {
        CommandError::WrongOptionType {
            name: name.to_string(),
            expected,
        }
    }

    pub fn string(&self, name: &str) -> Result<&str, CommandError> {
        match self.get(name)? {
            OptionValue::String(value) => Ok(value),
            _ => Err(Self::wrong_type(name, "string")),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, CommandError> {
        match self.get(name)? {
            OptionValue::Integer(value) => Ok(*value),
            _ => Err(Self::wrong_type(name, "integer")),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, CommandError> {
        match self.get(name)? {
            OptionValue::Boolean(value) => Ok(*value),
            _ => Err(Self::wrong_type(name, "boolean")),
        }
    }

    pub fn user(&self, name: &str) -> Result<u64, CommandError> {
        match self.get(name)? {
            OptionValue::User(value) => Ok(*value),
            _ => Err(Self::wrong_type(name, "user")),
        }
    }

    pub fn channel(&self, name: &str) -> Result<u64, CommandError> {
        match self.get(name)? {
            OptionValue::Channel(value) => Ok(*value),
            _ => Err(Self::wrong_type(name, "channel")),
        }
    }

    /// Like `string`, but an absent option is `Ok(None)`.
    pub fn optional_string(&self, name: &str) -> Result<Option<&str>, CommandError> {
        optional(self.string(name))
    }

    pub fn optional_integer(&self, name: &str) -> Result<Option<i64>, CommandError> {
        optional(self.integer(name))
    }

    pub fn optional_channel(&self, name: &str) -> Result<Option<u64>, CommandError> {
        optional(self.channel(name))
    }

    pub fn optional_user(&self, name: &str) -> Result<Option<u64>, CommandError> {
        optional(self.user(name))
    }
}

fn optional<T>(result: Result<T, CommandError>) -> Result<Option<T>, CommandError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(CommandError::MissingOption(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn collect_options(source: &[CommandDataOption], options: &mut HashMap<String, OptionValue>) {
    for option in source {
        let value = match &option.value {
            CommandDataOptionValue::String(value) => OptionValue::String(value.clone()),
            CommandDataOptionValue::Integer(value) => OptionValue::Integer(*value),
            CommandDataOptionValue::Boolean(value) => OptionValue::Boolean(*value),
            CommandDataOptionValue::User(id) => OptionValue::User(id.get()),
            CommandDataOptionValue::Channel(id) => OptionValue::Channel(id.get()),
            CommandDataOptionValue::Attachment(id) => OptionValue::Attachment(id.get()),
            _ => continue,
        };
        options.insert(option.name.clone(), value);
    }
}
