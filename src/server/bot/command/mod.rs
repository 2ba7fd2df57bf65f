//! Slash command framework.
//!
//! Every command implements `SlashCommand` and describes itself with a
//! `CommandDescriptor`. The static table in `catalog` is turned into a `CommandRegistry`
//! at startup; the `CommandRouter` looks commands up by name, enforces the owner gate and
//! turns handler failures into replies.

pub mod audit;
pub mod catalog;
pub mod info;
pub mod moderation;
pub mod options;
pub mod owner;
pub mod registry;
pub mod router;
pub mod utility;

use async_trait::async_trait;
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, Permissions};

use crate::server::{
    bot::{command::options::InteractionContext, context::BotContext, reply::ReplySink},
    error::command::CommandError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Attachment,
}

impl OptionKind {
    fn option_type(self) -> CommandOptionType {
        match self {
            Self::String => CommandOptionType::String,
            Self::Integer => CommandOptionType::Integer,
            Self::Boolean => CommandOptionType::Boolean,
            Self::User => CommandOptionType::User,
            Self::Channel => CommandOptionType::Channel,
            Self::Attachment => CommandOptionType::Attachment,
        }
    }
}

/// A typed option accepted by a command or subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    pub kind: OptionKind,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub choices: Vec<&'static str>,
}

impl OptionDescriptor {
    pub fn new(kind: OptionKind, name: &'static str, description: &'static str) -> Self {
        Self {
            kind,
            name,
            description,
            required: false,
            min: None,
            max: None,
            choices: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Inclusive bounds for an integer option.
    pub fn range(mut self, min: u64, max: u64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn choices(mut self, choices: &[&'static str]) -> Self {
        self.choices = choices.to_vec();
        self
    }

    fn to_create_option(&self) -> CreateCommandOption {
        let mut option =
            CreateCommandOption::new(self.kind.option_type(), self.name, self.description)
                .required(self.required);

        if let Some(min) = self.min {
            option = option.min_int_value(min);
        }
        if let Some(max) = self.max {
            option = option.max_int_value(max);
        }
        for choice in &self.choices {
            option = option.add_string_choice(*choice, *choice);
        }

        option
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubcommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionDescriptor>,
}

impl SubcommandDescriptor {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    /// Usable in servers and direct messages.
    Global,
    /// Only usable inside a server.
    Guild,
}

/// Static description of a slash command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionDescriptor>,
    pub subcommands: Vec<SubcommandDescriptor>,
    pub required_permissions: Option<Permissions>,
    pub scope: CommandScope,
    /// Only the configured bot owner may run the command.
    pub owner_only: bool,
}

impl CommandDescriptor {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            options: Vec::new(),
            subcommands: Vec::new(),
            required_permissions: None,
            scope: CommandScope::Global,
            owner_only: false,
        }
    }

    pub fn option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    pub fn subcommand(mut self, subcommand: SubcommandDescriptor) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.required_permissions = Some(permissions);
        self
    }

    pub fn guild_only(mut self) -> Self {
        self.scope = CommandScope::Guild;
        self
    }

    pub fn owner_only(mut self) -> Self {
        self.owner_only = true;
        self
    }

    /// Builds the registration payload sent to Discord.
    pub fn to_create_command(&self) -> CreateCommand {
        let mut command = CreateCommand::new(self.name).description(self.description);

        for option in &self.options {
            command = command.add_option(option.to_create_option());
        }
        for subcommand in &self.subcommands {
            let mut sub = CreateCommandOption::new(
                CommandOptionType::SubCommand,
                subcommand.name,
                subcommand.description,
            );
            for option in &subcommand.options {
                sub = sub.add_sub_option(option.to_create_option());
            }
            command = command.add_option(sub);
        }
        if let Some(permissions) = self.required_permissions {
            command = command.default_member_permissions(permissions);
        }
        if self.scope == CommandScope::Guild {
            command = command.dm_permission(false);
        }

        command
    }
}

/// A slash command handler.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    fn descriptor(&self) -> CommandDescriptor;

    /// Runs the command.
    ///
    /// Replies go through `reply`; a returned error is turned into a reply by the router.
    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError>;
}
