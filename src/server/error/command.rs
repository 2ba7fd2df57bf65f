use sea_orm::DbErr;
use thiserror::Error;

use crate::server::error::internal::InternalError;

/// Failures raised while routing or executing a slash command.
///
/// Variants above `Database` are caused by the invoking user and are shown to them
/// verbatim. The remaining variants are internal and only reach the user as a
/// generic message.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A required option was not supplied with the interaction.
    #[error("Missing required option `{0}`")]
    MissingOption(String),

    /// An option was supplied with a different type than the descriptor declares.
    #[error("Option `{name}` must be a {expected}")]
    WrongOptionType {
        /// Option name
        name: String,
        /// Expected option kind
        expected: &'static str,
    },

    /// The input was well-typed but not acceptable.
    #[error("{0}")]
    Validation(String),

    /// The invoking user may not perform this action.
    #[error("{0}")]
    PermissionDenied(String),

    /// A guild-only command was used in a direct message.
    #[error("This command can only be used in a server")]
    GuildOnly,

    /// A record the user asked for does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CommandError {
    /// Whether the error message is meant for the invoking user.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::MissingOption(_)
                | Self::WrongOptionType { .. }
                | Self::Validation(_)
                | Self::PermissionDenied(_)
                | Self::GuildOnly
                | Self::NotFound(_)
        )
    }
}

/// Boxes the error to keep `CommandError` small.
impl From<serenity::Error> for CommandError {
    fn from(err: serenity::Error) -> Self {
        CommandError::Discord(Box::new(err))
    }
}
