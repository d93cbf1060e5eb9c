use std::collections::HashSet;

use serenity::all::GuildId;
use serenity::http::Http;
use tracing::info;

use crate::interactions::SlashCommand;

/// Ensures the declared slash commands exist on the target guild, diffing by
/// name only. Edits to an already-installed definition are not detected.
pub async fn ensure_guild_commands(
    http: &Http,
    guild_id: GuildId,
    commands: &[Box<dyn SlashCommand>],
) -> serenity::Result<()> {
    let installed = guild_id.get_commands(http).await?;
    let installed: HashSet<&str> = installed
        .iter()
        .map(|command| command.name.as_str())
        .collect();

    for command in commands {
        if installed.contains(command.name()) {
            info!(command = command.name(), "command already installed");
        } else {
            info!(command = command.name(), "installing command");
            guild_id.create_command(http, command.definition()).await?;
        }
    }

    Ok(())
}
