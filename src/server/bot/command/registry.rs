//! Name to command lookup built once at startup.

use std::{collections::HashMap, sync::Arc};

use crate::server::{
    bot::command::{CommandDescriptor, SlashCommand},
    error::command::CommandError,
};

/// A command together with the descriptor it reported when registered.
#[derive(Clone)]
pub struct RegisteredCommand {
    pub descriptor: CommandDescriptor,
    pub command: Arc<dyn SlashCommand>,
}

/// Immutable once startup finishes; registration order is kept for syncing.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, RegisteredCommand>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command under its descriptor name.
    ///
    /// # Returns
    /// - `Ok(true)` - The command was registered
    /// - `Ok(false)` - A command with the same name already exists; the first one is kept
    /// - `Err(CommandError::Validation)` - The descriptor name is blank
    pub fn register(&mut self, command: Arc<dyn SlashCommand>) -> Result<bool, CommandError> {
        let descriptor = command.descriptor();

        if descriptor.name.trim().is_empty() {
            tracing::error!(
                "Refusing to register a command with a blank name ({})",
                descriptor.description
            );
            return Err(CommandError::Validation(
                "Command names must not be blank".to_string(),
            ));
        }

        if self.commands.contains_key(descriptor.name) {
            tracing::warn!(
                "Command {} is already registered, ignoring duplicate",
                descriptor.name
            );
            return Ok(false);
        }

        self.order.push(descriptor.name);
        self.commands
            .insert(descriptor.name, RegisteredCommand { descriptor, command });

        Ok(true)
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> Vec<&CommandDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .map(|registered| &registered.descriptor)
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
