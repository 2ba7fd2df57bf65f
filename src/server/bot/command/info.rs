//! Information about guild members.

use async_trait::async_trait;
use serenity::all::{GuildId, Member, Permissions, Role, User, UserId};

use crate::server::{
    bot::{
        command::{
            options::InteractionContext, CommandDescriptor, OptionDescriptor, OptionKind,
            SlashCommand,
        },
        context::BotContext,
        reply::{EmbedSpec, Reply, ReplySink, BOT_COLOUR},
    },
    error::command::CommandError,
};

/// Longest value Discord accepts in an embed field.
const MAX_FIELD_VALUE: usize = 1024;

/// The parts of a Discord user shown by `user-info`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: u64,
    pub name: String,
    pub bot: bool,
    pub avatar_url: String,
    /// Unix seconds.
    pub created_at: i64,
}

impl UserSummary {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.clone(),
            bot: user.bot,
            avatar_url: user.face(),
            created_at: user.id.created_at().unix_timestamp(),
        }
    }
}

/// Guild membership details, absent when the user is not in the guild.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSummary {
    pub nickname: Option<String>,
    /// Unix seconds.
    pub joined_at: Option<i64>,
    /// Role ids, highest role first.
    pub roles: Vec<u64>,
    pub permissions: Vec<String>,
}

impl MemberSummary {
    /// Summarises `member` using the guild's role list for ordering and permissions.
    pub fn from_member(member: &Member, guild_roles: &[Role]) -> Self {
        let mut roles = guild_roles
            .iter()
            .filter(|role| member.roles.contains(&role.id))
            .collect::<Vec<_>>();
        roles.sort_by(|a, b| b.position.cmp(&a.position));

        let permissions = roles
            .iter()
            .fold(Permissions::empty(), |acc, role| acc | role.permissions);

        Self {
            nickname: member.nick.clone(),
            joined_at: member.joined_at.map(|joined| joined.unix_timestamp()),
            roles: roles.iter().map(|role| role.id.get()).collect(),
            permissions: permission_names(permissions),
        }
    }
}

fn permission_names(permissions: Permissions) -> Vec<String> {
    if permissions.administrator() {
        return vec!["Administrator".to_string()];
    }

    permissions
        .get_permission_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Joins `items` with `, `, stopping before Discord's field limit.
///
/// Items that do not fit are counted in a trailing "and N more".
fn join_within_limit(items: &[String]) -> String {
    if items.is_empty() {
        return "None".to_string();
    }

    let mut value = String::new();
    for (shown, item) in items.iter().enumerate() {
        let separator = if value.is_empty() { "" } else { ", " };
        let left_after = items.len() - shown - 1;
        let reserve = match left_after {
            0 => 0,
            n => format!(" and {} more", n).len(),
        };

        if value.len() + separator.len() + item.len() + reserve > MAX_FIELD_VALUE {
            value.push_str(&format!(" and {} more", left_after + 1));
            return value;
        }

        value.push_str(separator);
        value.push_str(item);
    }

    value
}

pub fn user_info_embed(
    user: &UserSummary,
    member: Option<&MemberSummary>,
    requested_by: &str,
) -> EmbedSpec {
    let mut embed = EmbedSpec::new()
        .title("User Information")
        .description(format!("<@{}>", user.id))
        .field("Name", &user.name, true)
        .field("ID", user.id.to_string(), true)
        .field("Bot", if user.bot { "Yes" } else { "No" }, true)
        .field("Avatar", format!("[Link]({})", user.avatar_url), true)
        .field("Account Created", format!("<t:{}:F>", user.created_at), false);

    if let Some(member) = member {
        let roles = member
            .roles
            .iter()
            .map(|id| format!("<@&{}>", id))
            .collect::<Vec<_>>();

        if let Some(nickname) = &member.nickname {
            embed = embed.field("Nickname", nickname, true);
        }
        if let Some(joined_at) = member.joined_at {
            embed = embed.field("Joined Server", format!("<t:{}:F>", joined_at), false);
        }
        embed = embed
            .field(format!("Roles ({})", roles.len()), join_within_limit(&roles), false)
            .field("Permissions", join_within_limit(&member.permissions), false);
    }

    embed
        .footer(format!("Requested by {}", requested_by))
        .colour(BOT_COLOUR)
}

pub struct UserInfoCommand;

#[async_trait]
impl SlashCommand for UserInfoCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("user-info", "Get information about a user")
            .option(OptionDescriptor::new(
                OptionKind::User,
                "user",
                "The user to look up, yourself if omitted",
            ))
            .guild_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let guild_id = GuildId::new(ctx.require_guild()?);
        let user_id = UserId::new(ctx.optional_user("user")?.unwrap_or(ctx.user_id));

        let user = app.http.get_user(user_id).await?;

        let member = match app.http.get_member(guild_id, user_id).await {
            Ok(member) => {
                let roles = app.http.get_guild_roles(guild_id).await?;
                Some(MemberSummary::from_member(&member, &roles))
            }
            Err(e) => {
                tracing::debug!(
                    "User {} is not a member of guild {}: {}",
                    user_id,
                    guild_id,
                    e
                );
                None
            }
        };

        let user = UserSummary::from_user(&user);
        let embed = user_info_embed(&user, member.as_ref(), &ctx.user_name);

        reply.send(Reply::embed(embed)).await
    }
}
