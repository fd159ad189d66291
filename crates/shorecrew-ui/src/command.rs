//! Command parsing for the dashboard's input loop.
//!
//! Parsing is a pure function from an input line to a `Command`; dispatch
//! happens in the controller. Unknown input produces an error value for a
//! notice, never a crash.

use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  crew add <name>, <role>   add a volunteer to the roster
  crew rm <id>              remove a volunteer by id
  schedule                  schedule a cleanup (updates the stats)
  locate                    enable location and refetch the forecast
  refresh                   refetch the forecast
  events                    show the community event board
  join <event-id>           join a listed event
  status                    redraw the dashboard
  help                      show this help
  quit                      save and exit";

const USAGE_CREW: &str = "crew add <name>, <role>  |  crew rm <id>";
const USAGE_JOIN: &str = "join <event-id>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddCrew { name: String, role: String },
    RemoveCrew { id: String },
    Schedule,
    Locate,
    Refresh,
    Events,
    Join { id: String },
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("empty input")]
    Empty,
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parts = line.splitn(3, char::is_whitespace);
    let head = parts.next().unwrap_or("").to_lowercase();

    match head.as_str() {
        "crew" => match parts.next().map(str::to_lowercase).as_deref() {
            Some("add") => {
                let args = parts.next().unwrap_or("").trim();
                let (name, role) = args.split_once(',').ok_or(ParseError::Usage(USAGE_CREW))?;
                let (name, role) = (name.trim(), role.trim());
                if name.is_empty() || role.is_empty() {
                    return Err(ParseError::Usage(USAGE_CREW));
                }
                Ok(Command::AddCrew {
                    name: name.to_string(),
                    role: role.to_string(),
                })
            }
            Some("rm") | Some("remove") => {
                let id = parts.next().unwrap_or("").trim();
                if id.is_empty() {
                    return Err(ParseError::Usage(USAGE_CREW));
                }
                Ok(Command::RemoveCrew { id: id.to_string() })
            }
            _ => Err(ParseError::Usage(USAGE_CREW)),
        },
        "schedule" => Ok(Command::Schedule),
        "locate" => Ok(Command::Locate),
        "refresh" => Ok(Command::Refresh),
        "events" => Ok(Command::Events),
        "join" => {
            let id = parts.next().unwrap_or("").trim();
            if id.is_empty() {
                return Err(ParseError::Usage(USAGE_JOIN));
            }
            Ok(Command::Join { id: id.to_string() })
        }
        "status" => Ok(Command::Status),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(ParseError::Unknown(head)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crew_add_with_multiword_fields() {
        let cmd = parse("crew add Ana Reyes, Shore Captain");
        assert_eq!(
            cmd,
            Ok(Command::AddCrew {
                name: "Ana Reyes".to_string(),
                role: "Shore Captain".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_crew_add_requires_both_fields() {
        assert!(matches!(parse("crew add Ana"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("crew add , Sorter"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("crew add"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_parse_crew_rm() {
        let cmd = parse("crew rm abc-123");
        assert_eq!(
            cmd,
            Ok(Command::RemoveCrew {
                id: "abc-123".to_string()
            })
        );
        assert!(matches!(parse("crew rm"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("schedule"), Ok(Command::Schedule));
        assert_eq!(parse("LOCATE"), Ok(Command::Locate));
        assert_eq!(parse("refresh"), Ok(Command::Refresh));
        assert_eq!(parse("quit"), Ok(Command::Quit));
        assert_eq!(parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_join() {
        assert_eq!(parse("join ev-2"), Ok(Command::Join { id: "ev-2".to_string() }));
        assert!(matches!(parse("join"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert!(matches!(parse("dance"), Err(ParseError::Unknown(_))));
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }
}
