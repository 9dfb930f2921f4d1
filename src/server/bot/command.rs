//! Slash command registration from the command table.

use dioxus_logger::tracing;
use serenity::all::{Command, CommandOptionType, Context, CreateCommand, CreateCommandOption};

use crate::server::{model::command::CommandSpec, service::command::COMMANDS};

/// Builds the registration payload for one command table entry.
///
/// Every parameter is a string option; optional parameters are registered as
/// not required and resolved to their default at dispatch.
pub fn build_command(spec: &CommandSpec) -> CreateCommand {
    spec.params.iter().fold(
        CreateCommand::new(spec.name).description(spec.description),
        |command, param| {
            command.add_option(
                CreateCommandOption::new(CommandOptionType::String, param.name, param.description)
                    .required(param.is_required()),
            )
        },
    )
}

/// Replaces the bot's global slash commands with the command table.
///
/// # Arguments
/// - `ctx` - Discord context used for the registration request
///
/// # Returns
/// - `Ok(usize)` - Number of commands Discord accepted
/// - `Err(serenity::Error)` - Registration request failed
pub async fn register_commands(ctx: &Context) -> Result<usize, serenity::Error> {
    let commands: Vec<CreateCommand> = COMMANDS.iter().map(build_command).collect();

    let registered = Command::set_global_commands(&ctx.http, commands).await?;

    for command in &registered {
        tracing::debug!("Registered /{}", command.name);
    }

    Ok(registered.len())
}
