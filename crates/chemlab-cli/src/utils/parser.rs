use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command '{0}'. Expected element, compound, equip, drop, clear, dismiss, wait or show.")]
    UnknownCommand(String),

    #[error("Command '{0}' needs an argument.")]
    MissingArgument(&'static str),

    #[error("Command '{0}' takes no arguments.")]
    UnexpectedArgument(&'static str),

    #[error("Invalid wait duration '{0}'. Expected a whole number of milliseconds (e.g., 'wait 2000').")]
    InvalidDuration(String),
}

/// One line of a session script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabCommand {
    Element(String),
    Compound(String),
    Equip(String),
    /// Raw drag-and-drop JSON payload.
    Drop(String),
    Clear,
    Dismiss,
    Wait(Duration),
    Show,
}

/// Parses a single script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<LabCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let argument = |name: &'static str| {
        if rest.is_empty() {
            Err(ParseError::MissingArgument(name))
        } else {
            Ok(rest.to_string())
        }
    };
    let bare = |name: &'static str, command: LabCommand| {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(ParseError::UnexpectedArgument(name))
        }
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "element" => LabCommand::Element(argument("element")?),
        "compound" => LabCommand::Compound(argument("compound")?),
        "equip" => LabCommand::Equip(argument("equip")?),
        "drop" => LabCommand::Drop(argument("drop")?),
        "clear" => bare("clear", LabCommand::Clear)?,
        "dismiss" => bare("dismiss", LabCommand::Dismiss)?,
        "show" => bare("show", LabCommand::Show)?,
        "wait" => {
            let millis = argument("wait")?;
            let millis = millis
                .parse::<u64>()
                .map_err(|_| ParseError::InvalidDuration(millis.clone()))?;
            LabCommand::Wait(Duration::from_millis(millis))
        }
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Parses a whole script, pairing each command with its 1-based line number.
pub fn parse_script(source: &str) -> Result<Vec<(usize, LabCommand)>, (usize, ParseError)> {
    let mut commands = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        if let Some(command) = parse_line(line).map_err(|e| (line_number, e))? {
            commands.push((line_number, command));
        }
    }
    Ok(commands)
}
