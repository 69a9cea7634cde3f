// Unit tests for the command dispatch engine.
// The parser is pure, so everything here runs without a runtime.

use crate::parser::grammar::{self, Arity, GRAMMAR, Keyword};
use crate::parser::{Command, get_command_regex, number_of_arguments, parse_command};

fn invalid_message(command: Command) -> String {
    match command {
        Command::Invalid { message } => message,
        other => panic!("Expected Invalid, got {other:?}"),
    }
}

/// **VALUE**: Every fixed-arity keyword accepts exactly k tokens and rejects k-1 and k+1.
///
/// **WHY THIS MATTERS**: Downstream commands never re-check argument counts. If the parser
/// lets `find 1 2` through, `find` would look up the id "1 2" and report a confusing miss.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one in token counting or an entry whose
/// arity silently changed in the grammar table.
#[test]
fn given_fixed_arity_keywords_when_token_count_varies_then_only_exact_count_is_valid() {
    for entry in GRAMMAR.iter() {
        let Arity::Exactly(count) = entry.arity else {
            continue;
        };

        // GIVEN: k, k-1 and k+1 tokens
        let tokens = |n: usize| (0..n).map(|i| format!("tok{i}")).collect::<Vec<_>>().join(" ");
        let exact = format!("{} {}", entry.keyword, tokens(count));
        let too_many = format!("{} {}", entry.keyword, tokens(count + 1));

        // WHEN / THEN: exact count builds a real command
        assert!(
            !matches!(parse_command(&exact), Command::Invalid { .. }),
            "{exact} should be valid"
        );

        // AND: k+1 mentions the required count
        let message = invalid_message(parse_command(&too_many));
        assert!(
            message.contains(&format!("exactly {count} argument(s)")),
            "{too_many} gave: {message}"
        );

        // AND: k-1 (zero for single-argument commands) is rejected
        let too_few = format!("{} {}", entry.keyword, tokens(count - 1));
        let message = invalid_message(parse_command(&too_few));
        assert!(
            message.contains("Empty argument.") || message.contains(&count.to_string()),
            "{too_few} gave: {message}"
        );
    }
}

#[test]
fn given_auth_without_key_when_parsed_then_reports_empty_argument() {
    let message = invalid_message(parse_command("auth"));

    assert!(message.starts_with("Empty argument."));
    assert!(message.contains("auth API_KEY"), "Should show auth usage: {message}");
}

#[test]
fn given_auth_with_key_when_parsed_then_carries_key() {
    assert_eq!(
        parse_command("auth secretkey123"),
        Command::Authenticate {
            credential: String::from("secretkey123")
        }
    );
}

#[test]
fn given_auth_with_two_tokens_when_parsed_then_shows_auth_usage() {
    let message = invalid_message(parse_command("auth abc def"));

    assert!(message.contains("exactly 1 argument(s)"));
    assert!(message.contains("auth API_KEY"));
    assert!(!message.contains("favourite CARPARK_ID"));
}

#[test]
fn given_zero_arity_keywords_when_extra_text_then_invalid() {
    for keyword in [grammar::EXIT, grammar::LIST, grammar::UPDATE, grammar::HELP] {
        let message = invalid_message(parse_command(&format!("{keyword} extra")));
        assert_eq!(message, format!("{keyword} takes no arguments"));
    }
}

#[test]
fn given_zero_arity_keywords_when_bare_then_builds_variant() {
    assert_eq!(parse_command("exit"), Command::Exit);
    assert_eq!(parse_command("  list  "), Command::List);
    assert_eq!(parse_command("update"), Command::Refresh);
    assert_eq!(parse_command("help"), Command::Help);
    assert!(parse_command("exit").is_exit());
}

/// **VALUE**: Filter receives the whole remainder, un-split.
///
/// **BUG THIS CATCHES**: Would catch if filter were given `Arity::Exactly(1)` and
/// multi-word queries like `filter marina square` started failing.
#[test]
fn given_filter_with_many_words_when_parsed_then_passes_remainder_verbatim() {
    assert_eq!(
        parse_command("filter   marina   square "),
        Command::Filter {
            query: String::from("marina   square")
        }
    );

    let message = invalid_message(parse_command("filter"));
    assert!(message.starts_with("Empty argument."));
}

#[test]
fn given_id_commands_when_parsed_then_trimmed_id_is_kept() {
    assert_eq!(
        parse_command("find  A35 "),
        Command::Find {
            carpark_id: String::from("A35")
        }
    );
    assert_eq!(
        parse_command("favourite 1"),
        Command::Favourite {
            carpark_id: String::from("1")
        }
    );
    assert_eq!(
        parse_command("unfavourite 1"),
        Command::Unfavourite {
            carpark_id: String::from("1")
        }
    );
}

#[test]
fn given_empty_or_blank_input_when_parsed_then_invalid_command() {
    assert_eq!(invalid_message(parse_command("")), "Invalid Command");
    assert_eq!(invalid_message(parse_command(" \t ")), "Invalid Command");
}

#[test]
fn given_unknown_or_wrong_case_keyword_when_parsed_then_invalid_command_with_period() {
    assert_eq!(invalid_message(parse_command("park here")), "Invalid Command.");
    assert_eq!(invalid_message(parse_command("EXIT")), "Invalid Command.");
}

#[test]
fn given_whitespace_runs_when_counting_arguments_then_counts_non_empty_tokens() {
    assert_eq!(number_of_arguments(""), 0);
    assert_eq!(number_of_arguments("   "), 0);
    assert_eq!(number_of_arguments("a"), 1);
    assert_eq!(number_of_arguments(" a \t b\n c "), 3);
}

#[test]
fn given_command_regex_when_matching_then_splits_word_and_remainder() {
    let re = get_command_regex();

    let caps = re.captures("find A35").unwrap();

    assert_eq!(caps.name("command").unwrap().as_str(), "find");
    assert_eq!(caps.name("arguments").unwrap().as_str(), " A35");
    assert!(re.captures("").is_none());
}

#[test]
fn given_grammar_table_when_looking_up_then_every_keyword_is_unique_and_found() {
    for entry in GRAMMAR.iter() {
        assert_eq!(grammar::lookup(entry.keyword.word()), Some(entry));
    }
    assert!(grammar::lookup("Auth").is_none());
    assert!(grammar::help_text().contains("unfavourite CARPARK_ID"));
}

/// **VALUE**: Each keyword appears in the table exactly once.
///
/// **BUG THIS CATCHES**: Would catch a keyword added to `Keyword` but missing from the
/// table, which would make the new command unreachable from the console.
#[test]
fn given_every_keyword_when_looked_up_then_table_has_exactly_one_entry() {
    let keywords = [
        Keyword::Auth,
        Keyword::Exit,
        Keyword::Favourite,
        Keyword::Find,
        Keyword::List,
        Keyword::Filter,
        Keyword::Update,
        Keyword::Unfavourite,
        Keyword::Help,
    ];

    for keyword in keywords {
        let entries = GRAMMAR.iter().filter(|e| e.keyword == keyword).count();
        assert_eq!(entries, 1, "{keyword} should have one grammar entry");
        assert_eq!(keyword.to_string(), keyword.word());
    }
    assert_eq!(GRAMMAR.len(), keywords.len());
}
