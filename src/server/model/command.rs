//! Slash command table types.
//!
//! A `CommandSpec` describes one registered slash command: what Discord shows
//! the user and which action dispatch performs. `CommandInvocation` is the
//! platform-independent form of an incoming interaction.

use std::collections::HashMap;

/// What dispatch does when a command is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Answer a free-form Unity question.
    Ask,
    /// Generate a C# script for a described feature.
    GenerateCode,
    /// Explain an error message, with a canned quick fix when one is known.
    ExplainError,
    /// Report gateway latency. Not rate limited and makes no AI call.
    Ping,
}

/// A string parameter of a slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Value used when an optional parameter is omitted. `None` means required.
    pub default: Option<&'static str>,
}

impl ParamSpec {
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            default: None,
        }
    }

    pub const fn optional(
        name: &'static str,
        description: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// One entry of the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub action: CommandAction,
}

/// An incoming command with its arguments resolved to strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub user_id: u64,
    pub args: HashMap<String, String>,
}

impl CommandInvocation {
    pub fn new(name: impl Into<String>, user_id: u64) -> Self {
        Self {
            name: name.into(),
            user_id,
            args: HashMap::new(),
        }
    }

    /// Adds an argument, for building invocations by hand.
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Resolves a parameter, falling back to its default when omitted.
    ///
    /// # Returns
    /// - `Some(&str)` - Supplied value, or the parameter's default
    /// - `None` - A required parameter was not supplied
    pub fn arg<'a>(&'a self, param: &'a ParamSpec) -> Option<&'a str> {
        self.args
            .get(param.name)
            .map(String::as_str)
            .or(param.default)
    }
}
