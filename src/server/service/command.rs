//! The slash command table.

use crate::server::{
    model::command::{CommandAction, CommandSpec, ParamSpec},
    service::prompt::DEFAULT_CATEGORY,
};

pub const QUESTION_PARAM: ParamSpec =
    ParamSpec::required("question", "Your Unity development question");

pub const DESCRIPTION_PARAM: ParamSpec =
    ParamSpec::required("description", "What the script should do");

pub const CATEGORY_PARAM: ParamSpec = ParamSpec::optional(
    "category",
    "movement, physics, ui, animation, audio, ai, networking, input",
    DEFAULT_CATEGORY,
);

pub const ERROR_PARAM: ParamSpec =
    ParamSpec::required("error_message", "The error message from the Unity console");

/// Every command registered with Discord.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "ask",
        description: "Ask Unity development questions",
        params: &[QUESTION_PARAM],
        action: CommandAction::Ask,
    },
    CommandSpec {
        name: "code",
        description: "Generate a Unity C# script",
        params: &[DESCRIPTION_PARAM, CATEGORY_PARAM],
        action: CommandAction::GenerateCode,
    },
    CommandSpec {
        name: "error",
        description: "Explain a Unity error and how to fix it",
        params: &[ERROR_PARAM],
        action: CommandAction::ExplainError,
    },
    CommandSpec {
        name: "ping",
        description: "Check bot status",
        params: &[],
        action: CommandAction::Ping,
    },
];

/// Looks up a command by its registered name.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|command| command.name == name)
}
