//! Tests for the input prompts, driven through a scripted console

use console_menu::MenuError;
use console_menu::console::{ConsoleEvent, KeyPress, ScriptedConsole};
use console_menu::ui::Prompter;
use std::sync::Arc;

fn prompter(console: &Arc<ScriptedConsole>) -> Prompter {
    Prompter::new(console.clone())
}

fn scripted(lines: &[Option<&str>]) -> Arc<ScriptedConsole> {
    let console = ScriptedConsole::new();
    for line in lines {
        console.push_line(line.map(str::to_string));
    }
    Arc::new(console)
}

#[test]
fn test_get_number_returns_the_first_number() {
    let console = scripted(&[Some("abc"), Some(" 7 "), Some("9")]);

    let number = prompter(&console).get_number("Pick one", 3).unwrap();

    assert_eq!(number, Some(7));
    assert_eq!(console.lines_read(), 2);
    assert_eq!(console.count_line("Pick one"), 2);
}

#[test]
fn test_get_number_gives_up_after_the_attempts() {
    let console = scripted(&[Some("x"), None, Some("5")]);

    let number = prompter(&console).get_number("", 2).unwrap();

    assert_eq!(number, None);
    assert_eq!(console.lines_read(), 2);
    assert_eq!(console.remaining_lines(), 1);
    assert!(console.events().is_empty());
}

#[test]
fn test_get_number_in_range_rejects_out_of_range_values() {
    let console = scripted(&[Some("21"), Some("-21"), Some("abc"), Some("-20")]);

    let number = prompter(&console)
        .get_number_in_range("Pick", -20, 20, "exit", -100)
        .unwrap();

    assert_eq!(number, -20);
    assert_eq!(
        console.count_line(
            "*******Please enter a valid number between -20 and 20 -OR- type exit to leave *******"
        ),
        2
    );
    assert_eq!(
        console.count_line("*******Please enter a number -OR- type exit to leave *******"),
        1
    );
    assert_eq!(console.count_line("  "), 3);
}

#[test]
fn test_get_number_in_range_exit_text() {
    let console = scripted(&[Some("exit")]);
    let number = prompter(&console)
        .get_number_in_range("Pick", -20, 20, "exit", -100)
        .unwrap();
    assert_eq!(number, -100);

    // Only the exact exit text leaves the prompt
    let console = scripted(&[Some(" exit"), Some("EXIT"), Some("20")]);
    let number = prompter(&console)
        .get_number_in_range("Pick", -20, 20, "exit", -100)
        .unwrap();
    assert_eq!(number, 20);
    assert_eq!(console.lines_read(), 3);
}

#[test]
fn test_get_number_in_range_accepts_both_bounds() {
    let console = scripted(&[Some("5"), Some("5")]);
    let prompts = prompter(&console);

    assert_eq!(prompts.get_number_in_range("", 5, 5, "q", 0).unwrap(), 5);
    assert_eq!(prompts.get_number_in_range("", 1, 5, "q", 0).unwrap(), 5);
}

#[test]
fn test_get_number_in_range_with_inverted_bounds_is_an_invalid_argument() {
    let console = scripted(&[Some("1")]);

    let err = prompter(&console)
        .get_number_in_range("Pick", 10, 1, "exit", -1)
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MenuError>(),
        Some(MenuError::InvalidArgument(_))
    ));
    assert_eq!(console.lines_read(), 0);
}

#[test]
fn test_get_text_from_waits_for_a_listed_answer() {
    let console = scripted(&[
        Some("jack"),
        None,
        Some(""),
        Some(" "),
        Some("z"),
        Some("james"),
        Some("c"),
    ]);

    let answer = prompter(&console)
        .get_text_from("Who?", false, &["james", "john"])
        .unwrap();

    assert_eq!(answer, "james");
    assert_eq!(console.lines_read(), 6);
    assert_eq!(console.remaining_lines(), 1);
    assert_eq!(
        console.count_line("(Enter james or john and hit enter)"),
        6
    );
}

#[test]
fn test_get_text_from_ignoring_case_returns_the_input_as_typed() {
    let console = scripted(&[Some("JOHN"), Some("  JaMeS  ")]);
    let prompts = prompter(&console);

    let answer = prompts
        .get_text_from("Who?", true, &["james", "john"])
        .unwrap();
    assert_eq!(answer, "JOHN");

    let answer = prompts
        .get_text_from("Who?", true, &["james", "john"])
        .unwrap();
    assert_eq!(answer, "JaMeS");
}

#[test]
fn test_get_text_from_is_case_sensitive_by_default() {
    let console = scripted(&[Some("JOHN"), Some("john")]);

    let answer = prompter(&console)
        .get_text_from("", false, &["james", "john"])
        .unwrap();

    assert_eq!(answer, "john");
    assert_eq!(console.lines_read(), 2);
}

#[test]
fn test_get_text_from_without_answers_is_a_configuration_error() {
    let console = scripted(&[Some("anything")]);

    let err = prompter(&console).get_text_from("Who?", true, &[]).unwrap_err();

    assert_eq!(
        err.downcast_ref::<MenuError>(),
        Some(&MenuError::Configuration(
            "Please specify a valid answer array!".to_string()
        ))
    );
    assert!(console.events().is_empty());
}

#[test]
fn test_get_text_cases() {
    struct Case {
        input: &'static [Option<&'static str>],
        accept_blank: bool,
        trim_result: bool,
        expected: Option<&'static str>,
    }

    let cases = [
        Case {
            input: &[Some("  James  ")],
            accept_blank: false,
            trim_result: true,
            expected: Some("James"),
        },
        Case {
            input: &[Some("  James  ")],
            accept_blank: false,
            trim_result: false,
            expected: Some("  James  "),
        },
        Case {
            input: &[Some("   ")],
            accept_blank: true,
            trim_result: true,
            expected: Some(""),
        },
        Case {
            input: &[Some("   ")],
            accept_blank: true,
            trim_result: false,
            expected: Some("   "),
        },
        Case {
            input: &[None],
            accept_blank: true,
            trim_result: true,
            expected: None,
        },
        Case {
            input: &[None, Some(""), Some("  "), Some("JaMes ")],
            accept_blank: false,
            trim_result: true,
            expected: Some("JaMes"),
        },
    ];

    for (index, case) in cases.iter().enumerate() {
        let console = scripted(case.input);

        let text = prompter(&console)
            .get_text("Name?", case.accept_blank, case.trim_result)
            .unwrap();

        assert_eq!(text.as_deref(), case.expected, "case {}", index);
        assert_eq!(console.remaining_lines(), 0, "case {}", index);
    }
}

#[test]
fn test_blank_prompt_is_not_written() {
    let console = scripted(&[Some("hello"), Some("there")]);
    let prompts = prompter(&console);

    prompts.get_text("", false, true).unwrap();
    prompts.get_text("   ", false, true).unwrap();

    assert!(console.events().is_empty());
}

#[test]
fn test_get_y_or_n_skips_unlisted_keys() {
    let console = Arc::new(ScriptedConsole::new().with_keys("xzY"));

    let answer = prompter(&console).get_y_or_n("Continue?").unwrap();

    assert!(answer);
    assert_eq!(console.keys_read(), 3);
    assert_eq!(console.count_line("Continue?"), 3);
}

#[test]
fn test_get_y_or_n_no() {
    let console = Arc::new(ScriptedConsole::new().with_keys("N"));
    assert!(!prompter(&console).get_y_or_n("Continue?").unwrap());
}

#[test]
fn test_get_character_ignores_keys_without_a_character() {
    let console = ScriptedConsole::new();
    console.push_key(KeyPress::other());
    console.push_key(KeyPress::char('b'));
    let console = Arc::new(console);

    let answer = prompter(&console)
        .get_character("Pick", false, &['a', 'b'])
        .unwrap();

    assert_eq!(answer, 'b');
    assert_eq!(console.keys_read(), 2);
}

#[test]
fn test_get_character_respects_case() {
    let console = Arc::new(ScriptedConsole::new().with_keys("Aa"));

    let answer = prompter(&console)
        .get_character("", false, &['a'])
        .unwrap();

    assert_eq!(answer, 'a');
    assert_eq!(console.keys_read(), 2);
}

#[test]
fn test_get_character_writes_prompt_then_hint() {
    let console = Arc::new(ScriptedConsole::new().with_keys("y"));

    prompter(&console).get_y_or_n("Are you a developer?").unwrap();

    assert_eq!(
        console.events(),
        vec![
            ConsoleEvent::WriteLine("Are you a developer?".to_string()),
            ConsoleEvent::WriteLine("(Enter y or n and hit enter)".to_string()),
        ]
    );
}

#[test]
fn test_get_character_with_blank_prompt_writes_only_the_hint() {
    for prompt in ["", " ", "   "] {
        let console = Arc::new(ScriptedConsole::new().with_keys("xn"));

        let answer = prompter(&console).get_y_or_n(prompt).unwrap();

        assert!(!answer);
        assert_eq!(console.count_line(""), 0, "prompt {:?}", prompt);
        assert_eq!(console.count_line(prompt), 0, "prompt {:?}", prompt);
        assert_eq!(
            console.lines_written(),
            vec!["(Enter y or n and hit enter)"; 2],
            "prompt {:?}",
            prompt
        );
    }
}

#[test]
fn test_get_character_without_answers_is_a_configuration_error() {
    let console = Arc::new(ScriptedConsole::new().with_keys("y"));

    let err = prompter(&console).get_character("Pick", true, &[]).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MenuError>(),
        Some(MenuError::Configuration(_))
    ));
    assert_eq!(console.keys_read(), 0);
}

#[test]
fn test_exhausted_input_ends_an_unbounded_prompt() {
    let console = scripted(&[Some("not a number")]);

    let err = prompter(&console)
        .get_number_in_range("Pick", 1, 3, "exit", 0)
        .unwrap_err();

    let io = err
        .downcast_ref::<std::io::Error>()
        .expect("io error in the chain");
    assert_eq!(io.kind(), std::io::ErrorKind::UnexpectedEof);
}
