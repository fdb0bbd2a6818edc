//! Shell Command Parsing
//!
//! Turns one input line into a [`Command`].

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put { key: String, value: String },
    Get { key: String },
    Del { key: String },
    List,
    Clear,
    Help,
    History,
    Exit,
    /// A known keyword missing its arguments; carries the usage error
    Usage(&'static str),
    /// Anything that is not a known keyword
    Unknown(String),
    /// Blank line
    Empty,
}

impl Command {
    /// Parses a line. Keywords are case-sensitive and arguments are
    /// whitespace-separated; extra arguments are ignored.
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Command::Empty;
        };

        match keyword {
            "PUT" => match (words.next(), words.next()) {
                (Some(key), Some(value)) => Command::Put {
                    key: key.to_string(),
                    value: value.to_string(),
                },
                _ => Command::Usage("PUT requires key and value"),
            },
            "GET" => match words.next() {
                Some(key) => Command::Get {
                    key: key.to_string(),
                },
                None => Command::Usage("GET requires key"),
            },
            "DEL" => match words.next() {
                Some(key) => Command::Del {
                    key: key.to_string(),
                },
                None => Command::Usage("DEL requires key"),
            },
            "LIST" => Command::List,
            "CLEAR" => Command::Clear,
            "HELP" => Command::Help,
            "HISTORY" => Command::History,
            "EXIT" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put() {
        assert_eq!(
            Command::parse("PUT foo bar"),
            Command::Put {
                key: "foo".to_string(),
                value: "bar".to_string()
            }
        );
    }

    #[test]
    fn test_parse_ignores_extra_whitespace_and_arguments() {
        assert_eq!(
            Command::parse("  GET   foo  extra "),
            Command::Get {
                key: "foo".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_arguments() {
        assert_eq!(
            Command::parse("PUT foo"),
            Command::Usage("PUT requires key and value")
        );
        assert_eq!(Command::parse("GET"), Command::Usage("GET requires key"));
        assert_eq!(Command::parse("DEL"), Command::Usage("DEL requires key"));
    }

    #[test]
    fn test_parse_keywords_are_case_sensitive() {
        assert_eq!(Command::parse("get foo"), Command::Unknown("get".to_string()));
        assert_eq!(Command::parse("LIST"), Command::List);
        assert_eq!(Command::parse("EXIT"), Command::Exit);
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("   \t"), Command::Empty);
    }
}
