//! Slash command interaction handler.

use dioxus_logger::tracing;
use serenity::all::{CommandDataOptionValue, CommandInteraction, Context, Interaction};

use crate::server::{
    bot::reply::InteractionReply, model::command::CommandInvocation, state::BotContext,
};

/// Handles an interaction by dispatching slash commands to the command service.
///
/// Other interaction kinds (autocomplete, components, modals) are ignored since
/// the bot registers none. Each command is handled in its own task so a slow
/// completion call never holds up the gateway event loop.
///
/// # Arguments
/// - `bot` - Command service and status shared by all handlers
/// - `ctx` - Discord context used to answer the interaction
/// - `interaction` - The incoming interaction
pub async fn handle_interaction(bot: &BotContext, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let invocation = to_invocation(&command);
    let commands = bot.commands.clone();

    tokio::spawn(async move {
        let mut reply = InteractionReply::new(ctx, command);
        let outcome = commands.dispatch(&invocation, &mut reply).await;

        tracing::debug!("/{} finished: {:?}", invocation.name, outcome);
    });
}

/// Converts a command interaction into a platform-independent invocation.
///
/// Only string options are collected; the command table declares no others.
fn to_invocation(command: &CommandInteraction) -> CommandInvocation {
    collect_string_options(
        CommandInvocation::new(command.data.name.clone(), command.user.id.get()),
        command
            .data
            .options
            .iter()
            .map(|option| (option.name.as_str(), &option.value)),
    )
}

fn collect_string_options<'a>(
    invocation: CommandInvocation,
    options: impl IntoIterator<Item = (&'a str, &'a CommandDataOptionValue)>,
) -> CommandInvocation {
    options
        .into_iter()
        .fold(invocation, |invocation, (name, value)| match value.as_str() {
            Some(value) => invocation.with_arg(name, value),
            None => invocation,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests option collection from an interaction payload.
    ///
    /// Expected: String options become arguments, other kinds are skipped
    #[test]
    fn collects_only_string_options() {
        let description = CommandDataOptionValue::String("a sliding door".to_string());
        let count = CommandDataOptionValue::Integer(3);

        let invocation = collect_string_options(
            CommandInvocation::new("code", 9),
            [("description", &description), ("count", &count)],
        );

        assert_eq!(invocation.args.len(), 1);
        assert_eq!(
            invocation.args.get("description").map(String::as_str),
            Some("a sliding door")
        );
        assert_eq!(invocation.user_id, 9);
    }
}
