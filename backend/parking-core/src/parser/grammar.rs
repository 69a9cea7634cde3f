//! Keyword table driving command validation.

/// How many argument tokens a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No arguments at all.
    None,
    /// Exactly this many whitespace-separated tokens.
    Exactly(usize),
    /// Any non-empty remainder, passed through un-split.
    FreeText,
}

/// Every command word the console understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Auth,
    Exit,
    Favourite,
    Find,
    List,
    Filter,
    Update,
    Unfavourite,
    Help,
}

impl Keyword {
    pub const fn word(self) -> &'static str {
        match self {
            Keyword::Auth => AUTH,
            Keyword::Exit => EXIT,
            Keyword::Favourite => FAVOURITE,
            Keyword::Find => FIND,
            Keyword::List => LIST,
            Keyword::Filter => FILTER,
            Keyword::Update => UPDATE,
            Keyword::Unfavourite => UNFAVOURITE,
            Keyword::Help => HELP,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.word())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarEntry {
    pub keyword: Keyword,
    pub arity: Arity,
    pub usage: &'static str,
}

pub const AUTH: &str = "auth";
pub const EXIT: &str = "exit";
pub const FAVOURITE: &str = "favourite";
pub const FIND: &str = "find";
pub const LIST: &str = "list";
pub const FILTER: &str = "filter";
pub const UPDATE: &str = "update";
pub const UNFAVOURITE: &str = "unfavourite";
pub const HELP: &str = "help";

pub static GRAMMAR: [GrammarEntry; 9] = [
    GrammarEntry {
        keyword: Keyword::Auth,
        arity: Arity::Exactly(1),
        usage: "auth API_KEY\n    Authenticates your personal API key and fetches the latest data.",
    },
    GrammarEntry {
        keyword: Keyword::Exit,
        arity: Arity::None,
        usage: "exit\n    Exits the program.",
    },
    GrammarEntry {
        keyword: Keyword::Favourite,
        arity: Arity::Exactly(1),
        usage: "favourite CARPARK_ID\n    Adds a carpark to your favourites.",
    },
    GrammarEntry {
        keyword: Keyword::Find,
        arity: Arity::Exactly(1),
        usage: "find CARPARK_ID\n    Shows the availability of one carpark.",
    },
    GrammarEntry {
        keyword: Keyword::List,
        arity: Arity::None,
        usage: "list\n    Lists every carpark.",
    },
    GrammarEntry {
        keyword: Keyword::Filter,
        arity: Arity::FreeText,
        usage: "filter QUERY\n    Lists carparks whose id, area or development mention every word of QUERY.",
    },
    GrammarEntry {
        keyword: Keyword::Update,
        arity: Arity::None,
        usage: "update\n    Fetches the latest data with your current API key.",
    },
    GrammarEntry {
        keyword: Keyword::Unfavourite,
        arity: Arity::Exactly(1),
        usage: "unfavourite CARPARK_ID\n    Removes a carpark from your favourites.",
    },
    GrammarEntry {
        keyword: Keyword::Help,
        arity: Arity::None,
        usage: "help\n    Shows this list of commands.",
    },
];

/// Case-sensitive lookup.
pub fn lookup(word: &str) -> Option<&'static GrammarEntry> {
    GRAMMAR.iter().find(|entry| entry.keyword.word() == word)
}

/// Usage text for every command, in table order.
pub fn help_text() -> String {
    GRAMMAR
        .iter()
        .map(|entry| entry.usage)
        .collect::<Vec<_>>()
        .join("\n")
}
