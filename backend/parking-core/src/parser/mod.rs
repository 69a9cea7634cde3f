//! Turns one line of user input into a [`Command`].
//!
//! Parsing never fails: malformed input becomes [`Command::Invalid`] with a
//! diagnostic for the user. Argument counts are checked here and nowhere
//! else; whether an id actually exists is the executing command's concern.

pub mod grammar;

use grammar::{Arity, GrammarEntry, Keyword};

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

const BASIC_COMMAND_PATTERN: &str = r"(?s)^(?P<command>\S+)(?P<arguments>.*)$";
const COMMAND_CAPTURE: &str = "command";
const ARGUMENTS_CAPTURE: &str = "arguments";

const INVALID_COMMAND: &str = "Invalid Command";
const UNKNOWN_COMMAND: &str = "Invalid Command.";
const EMPTY_ARGUMENT_HEADER: &str = "Empty argument. Valid command(s): \n";

static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| Regex::new(BASIC_COMMAND_PATTERN).expect("valid regex pattern"))
}

/// A validated user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Authenticate { credential: String },
    Refresh,
    Find { carpark_id: String },
    Filter { query: String },
    Favourite { carpark_id: String },
    Unfavourite { carpark_id: String },
    List,
    Help,
    Exit,
    Invalid { message: String },
}

impl Command {
    fn invalid(message: impl Into<String>) -> Self {
        Command::Invalid {
            message: message.into(),
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Command::Exit)
    }
}

/// Parse a raw input line.
pub fn parse_command(input: &str) -> Command {
    let Some(captures) = get_command_regex().captures(input.trim()) else {
        return Command::invalid(INVALID_COMMAND);
    };

    let command_word = captures
        .name(COMMAND_CAPTURE)
        .map_or("", |m| m.as_str());
    let arguments = captures
        .name(ARGUMENTS_CAPTURE)
        .map_or("", |m| m.as_str())
        .trim();

    let Some(entry) = grammar::lookup(command_word) else {
        debug!("Unknown command word: {command_word}");
        return Command::invalid(UNKNOWN_COMMAND);
    };

    if let Some(message) = check_arity(entry, arguments) {
        return Command::invalid(message);
    }

    build(entry.keyword, arguments)
}

/// Diagnostic for an arity violation, if any.
fn check_arity(entry: &GrammarEntry, arguments: &str) -> Option<String> {
    match entry.arity {
        Arity::None if !arguments.is_empty() => {
            Some(format!("{} takes no arguments", entry.keyword))
        }
        Arity::None => None,
        Arity::Exactly(_) | Arity::FreeText if arguments.is_empty() => {
            Some(format!("{EMPTY_ARGUMENT_HEADER}{}", entry.usage))
        }
        Arity::Exactly(count) if number_of_arguments(arguments) != count => Some(format!(
            "This command only takes exactly {count} argument(s). Valid command(s): \n{}",
            entry.usage
        )),
        Arity::Exactly(_) | Arity::FreeText => None,
    }
}

fn build(keyword: Keyword, arguments: &str) -> Command {
    let arguments = arguments.to_string();
    match keyword {
        Keyword::Auth => Command::Authenticate {
            credential: arguments,
        },
        Keyword::Exit => Command::Exit,
        Keyword::Favourite => Command::Favourite {
            carpark_id: arguments,
        },
        Keyword::Find => Command::Find {
            carpark_id: arguments,
        },
        Keyword::List => Command::List,
        Keyword::Filter => Command::Filter { query: arguments },
        Keyword::Update => Command::Refresh,
        Keyword::Unfavourite => Command::Unfavourite {
            carpark_id: arguments,
        },
        Keyword::Help => Command::Help,
    }
}

/// Number of whitespace-separated tokens. Blank input counts as zero.
pub fn number_of_arguments(input: &str) -> usize {
    input.split_whitespace().count()
}
