use crate::ui::{COMMAND_PROMPT, NAME_PROMPT, Ui};

use std::io::Cursor;

fn ui_with_input(input: &str) -> Ui<Cursor<Vec<u8>>, Vec<u8>> {
    Ui::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn output_of(ui: Ui<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(ui.into_output()).unwrap()
}

#[test]
fn given_name_when_greeting_then_welcomes_by_name() {
    let mut ui = ui_with_input("Alex\n");

    ui.greet_user().unwrap();

    let output = output_of(ui);
    assert!(output.contains(NAME_PROMPT));
    assert!(output.ends_with("Welcome to parKING, Alex!\n"));
}

#[test]
fn given_no_input_when_greeting_then_generic_welcome() {
    let mut ui = ui_with_input("");

    ui.greet_user().unwrap();

    assert!(output_of(ui).ends_with("Welcome to parKING!\n"));
}

#[test]
fn given_lines_when_reading_commands_then_prompts_and_strips_terminators() {
    let mut ui = ui_with_input("find 1\r\nexit\n");

    assert_eq!(ui.read_command().unwrap().as_deref(), Some("find 1"));
    assert_eq!(ui.read_command().unwrap().as_deref(), Some("exit"));
    assert_eq!(ui.read_command().unwrap(), None);

    assert_eq!(output_of(ui).matches(COMMAND_PROMPT).count(), 3);
}
