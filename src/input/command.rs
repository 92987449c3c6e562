use crate::history::Direction;
use thiserror::Error;

/// Something the user asked the browser to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Open(String),
    Back(usize),
    Forward(usize),
    Peek(Direction, usize),
    Clear(Direction),
    Reload,
    NewTab(Option<String>),
    CloseTab,
    SwitchTab(usize),
    Show,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("expected 'back' or 'forward', got '{0}'")]
    BadDirection(String),
    #[error("invalid distance '{0}': expected a positive integer")]
    BadDistance(String),
    #[error("invalid tab index '{0}'")]
    BadTabIndex(String),
    #[error("unexpected argument '{0}'")]
    TrailingArgument(String),
}

/// Parses one script line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Action>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let action = match command {
        "open" | "go" => Action::Open(required(&mut words, "open")?.to_string()),
        "back" => Action::Back(distance(words.next())?),
        "forward" => Action::Forward(distance(words.next())?),
        "peek" => {
            let direction = direction(required(&mut words, "peek")?)?;
            Action::Peek(direction, distance(words.next())?)
        }
        "clear" => Action::Clear(direction(required(&mut words, "clear")?)?),
        "reload" => Action::Reload,
        "show" => Action::Show,
        "tab" => match required(&mut words, "tab")? {
            "new" => Action::NewTab(words.next().map(str::to_string)),
            "close" => Action::CloseTab,
            index => Action::SwitchTab(
                index
                    .parse()
                    .map_err(|_| CommandError::BadTabIndex(index.to_string()))?,
            ),
        },
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    match words.next() {
        Some(extra) => Err(CommandError::TrailingArgument(extra.to_string())),
        None => Ok(Some(action)),
    }
}

fn required<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<&'a str, CommandError> {
    words.next().ok_or(CommandError::MissingArgument(command))
}

fn direction(word: &str) -> Result<Direction, CommandError> {
    match word {
        "back" => Ok(Direction::Back),
        "forward" => Ok(Direction::Forward),
        other => Err(CommandError::BadDirection(other.to_string())),
    }
}

fn distance(word: Option<&str>) -> Result<usize, CommandError> {
    let Some(word) = word else {
        return Ok(1);
    };
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadDistance(word.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# open example.com"), Ok(None));
    }

    #[test]
    fn test_navigation_commands() {
        assert_eq!(
            parse_line("open example.com"),
            Ok(Some(Action::Open("example.com".to_string())))
        );
        assert_eq!(parse_line("back"), Ok(Some(Action::Back(1))));
        assert_eq!(parse_line("back 3"), Ok(Some(Action::Back(3))));
        assert_eq!(parse_line("  forward 2 "), Ok(Some(Action::Forward(2))));
    }

    #[test]
    fn test_peek_and_clear() {
        assert_eq!(
            parse_line("peek forward 2"),
            Ok(Some(Action::Peek(Direction::Forward, 2)))
        );
        assert_eq!(parse_line("peek back"), Ok(Some(Action::Peek(Direction::Back, 1))));
        assert_eq!(parse_line("clear back"), Ok(Some(Action::Clear(Direction::Back))));
        assert_eq!(
            parse_line("clear sideways"),
            Err(CommandError::BadDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_tab_commands() {
        assert_eq!(parse_line("tab new"), Ok(Some(Action::NewTab(None))));
        assert_eq!(
            parse_line("tab new example.org"),
            Ok(Some(Action::NewTab(Some("example.org".to_string()))))
        );
        assert_eq!(parse_line("tab close"), Ok(Some(Action::CloseTab)));
        assert_eq!(parse_line("tab 2"), Ok(Some(Action::SwitchTab(2))));
        assert_eq!(
            parse_line("tab left"),
            Err(CommandError::BadTabIndex("left".to_string()))
        );
    }

    #[test]
    fn test_zero_distance_is_rejected() {
        assert_eq!(parse_line("back 0"), Err(CommandError::BadDistance("0".to_string())));
        assert_eq!(parse_line("forward -1"), Err(CommandError::BadDistance("-1".to_string())));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_line("open"), Err(CommandError::MissingArgument("open")));
        assert_eq!(parse_line("jump"), Err(CommandError::Unknown("jump".to_string())));
        assert_eq!(
            parse_line("reload now"),
            Err(CommandError::TrailingArgument("now".to_string()))
        );
    }
}
