use snafu::Snafu;

/// One parsed input line. Numeric arguments are validated (and negatives
/// rejected) here, before any filesystem operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { name: String },
    Delete { name: String },
    Mkdir { name: String },
    Chdir { name: String },
    Ls,
    Move { source: String, target: String },
    Open { name: String },
    Close { name: String },
    Write { name: String, text: String },
    WriteAt { name: String, pos: usize, text: String },
    Read { name: String },
    ReadFrom { name: String, start: usize, size: usize },
    MoveWithin { name: String, start: usize, size: usize, target: usize },
    Truncate { name: String, size: usize },
    MemoryMap,
    Help { command: Option<String> },
    Exit,
}

/// Splits the next whitespace-delimited word off the front of `input`,
/// returning it together with the unconsumed remainder.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], &input[at..]),
        None => (input, ""),
    }
}

fn word_arg<'a>(input: &'a str, what: &'static str) -> Result<(String, &'a str), ParseError> {
    let (word, rest) = next_word(input);
    if word.is_empty() {
        return MissingArgumentSnafu { what }.fail();
    }
    Ok((word.to_owned(), rest))
}

fn number_arg<'a>(input: &'a str, what: &'static str) -> Result<(usize, &'a str), ParseError> {
    let (word, rest) = word_arg(input, what)?;
    let value: i64 = word
        .parse()
        .map_err(|_| ParseError::InvalidNumber { what, value: word })?;
    if value < 0 {
        return NegativeArgumentSnafu { what, value }.fail();
    }
    Ok((value as usize, rest))
}

/// The rest of the line as free text, with the single separating space
/// removed. Further leading whitespace belongs to the text itself.
fn text_arg(input: &str) -> String {
    input.strip_prefix(' ').unwrap_or(input).to_owned()
}

/// Parses one input line into a [`Command`].
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (keyword, rest) = next_word(line);

    let command = match keyword {
        "" => return EmptyLineSnafu.fail(),
        "create" => {
            let (name, _) = word_arg(rest, "<filename>")?;
            Command::Create { name }
        }
        "delete" => {
            let (name, _) = word_arg(rest, "<filename>")?;
            Command::Delete { name }
        }
        "mkdir" => {
            let (name, _) = word_arg(rest, "<dirname>")?;
            Command::Mkdir { name }
        }
        "chdir" => {
            let (name, _) = word_arg(rest, "<dirname>")?;
            Command::Chdir { name }
        }
        "ls" => Command::Ls,
        "move" => {
            let (source, rest) = word_arg(rest, "<source>")?;
            let (target, _) = word_arg(rest, "<target>")?;
            Command::Move { source, target }
        }
        "open" => {
            let (name, _) = word_arg(rest, "<filename>")?;
            Command::Open { name }
        }
        "close" => {
            let (name, _) = word_arg(rest, "<filename>")?;
            Command::Close { name }
        }
        "write" => {
            let (name, rest) = word_arg(rest, "<filename>")?;
            Command::Write {
                name,
                text: text_arg(rest),
            }
        }
        "write_at" => {
            let (name, rest) = word_arg(rest, "<filename>")?;
            let (pos, rest) = number_arg(rest, "<pos>")?;
            Command::WriteAt {
                name,
                pos,
                text: text_arg(rest),
            }
        }
        "read" => {
            let (name, _) = word_arg(rest, "<filename>")?;
            Command::Read { name }
        }
        "read_from" => {
            let (name, rest) = word_arg(rest, "<filename>")?;
            let (start, rest) = number_arg(rest, "<start>")?;
            let (size, _) = number_arg(rest, "<size>")?;
            Command::ReadFrom { name, start, size }
        }
        "move_within" => {
            let (name, rest) = word_arg(rest, "<filename>")?;
            let (start, rest) = number_arg(rest, "<start>")?;
            let (size, rest) = number_arg(rest, "<size>")?;
            let (target, _) = number_arg(rest, "<target>")?;
            Command::MoveWithin {
                name,
                start,
                size,
                target,
            }
        }
        "truncate" => {
            let (name, rest) = word_arg(rest, "<filename>")?;
            let (size, _) = number_arg(rest, "<size>")?;
            Command::Truncate { name, size }
        }
        "memory_map" => Command::MemoryMap,
        "help" => {
            let topic = rest.trim();
            Command::Help {
                command: (!topic.is_empty()).then(|| topic.to_owned()),
            }
        }
        "exit" => Command::Exit,
        other => {
            return UnknownCommandSnafu { name: other }.fail();
        }
    };
    Ok(command)
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ParseError {
    #[snafu(display("empty input line"))]
    EmptyLine,
    #[snafu(display("unknown command: {name}"))]
    UnknownCommand { name: String },
    #[snafu(display("missing argument {what}"))]
    MissingArgument { what: &'static str },
    #[snafu(display("argument {what} must be a number, got '{value}'"))]
    InvalidNumber { what: &'static str, value: String },
    #[snafu(display("argument {what} cannot be negative, got {value}"))]
    NegativeArgument { what: &'static str, value: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn parses_single_name_commands() {
        assert_eq!(
            parse("create a.txt").unwrap(),
            Command::Create {
                name: "a.txt".into()
            }
        );
        assert_eq!(
            parse("chdir ..").unwrap(),
            Command::Chdir { name: "..".into() }
        );
        assert_eq!(parse("ls").unwrap(), Command::Ls);
        assert_eq!(parse("exit\n").unwrap(), Command::Exit);
    }

    #[test]
    fn write_takes_the_rest_of_the_line_with_spaces() {
        assert_eq!(
            parse("write f hello brave world").unwrap(),
            Command::Write {
                name: "f".into(),
                text: "hello brave world".into()
            }
        );
        // One separating space is eaten; any further spaces are text.
        assert_eq!(
            parse("write f   indented").unwrap(),
            Command::Write {
                name: "f".into(),
                text: "  indented".into()
            }
        );
    }

    #[test]
    fn write_with_no_text_writes_nothing() {
        assert_eq!(
            parse("write f").unwrap(),
            Command::Write {
                name: "f".into(),
                text: String::new()
            }
        );
    }

    #[test]
    fn write_at_parses_position_then_text() {
        assert_eq!(
            parse("write_at f 10 padded text").unwrap(),
            Command::WriteAt {
                name: "f".into(),
                pos: 10,
                text: "padded text".into()
            }
        );
    }

    #[test]
    fn numeric_commands_parse_all_fields() {
        assert_eq!(
            parse("read_from f 3 100").unwrap(),
            Command::ReadFrom {
                name: "f".into(),
                start: 3,
                size: 100
            }
        );
        assert_eq!(
            parse("move_within f 2 3 8").unwrap(),
            Command::MoveWithin {
                name: "f".into(),
                start: 2,
                size: 3,
                target: 8
            }
        );
        assert_eq!(
            parse("truncate f 0").unwrap(),
            Command::Truncate {
                name: "f".into(),
                size: 0
            }
        );
    }

    #[rstest]
    #[case("write_at f -1 text")]
    #[case("read_from f -3 5")]
    #[case("move_within f 0 2 -8")]
    #[case("truncate f -1")]
    fn negative_numbers_are_rejected(#[case] line: &str) {
        assert!(matches!(
            parse(line),
            Err(ParseError::NegativeArgument { .. })
        ));
    }

    #[test]
    fn non_numeric_position_is_rejected() {
        assert!(matches!(
            parse("truncate f lots"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert_eq!(
            parse("create"),
            Err(ParseError::MissingArgument {
                what: "<filename>"
            })
        );
        assert!(parse("move only_source").is_err());
    }

    #[test]
    fn help_with_and_without_topic() {
        assert_eq!(parse("help").unwrap(), Command::Help { command: None });
        assert_eq!(
            parse("help mkdir").unwrap(),
            Command::Help {
                command: Some("mkdir".into())
            }
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse("   \n"), Err(ParseError::EmptyLine));
        assert_eq!(
            parse("frobnicate x"),
            Err(ParseError::UnknownCommand {
                name: "frobnicate".into()
            })
        );
    }
}
