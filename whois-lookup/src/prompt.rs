//! Interactive prompt commands.
//!
//! Anything typed at the prompt is a search unless it starts with `:`.

use whois_lookup_lib::DisplayMode;

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the text as the domain to look up (may be blank)
    Search(String),
    /// Switch the table filter
    Mode(DisplayMode),
    Help,
    Quit,
    /// Unrecognized `:` command, with a message for the user
    Invalid(String),
}

/// Parse one line read from the prompt.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();

    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Search(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next();

    match (name.as_str(), arg) {
        ("q" | "quit" | "exit", _) => Command::Quit,
        ("h" | "help", _) => Command::Help,
        ("domain", None) => Command::Mode(DisplayMode::Domain),
        ("contact", None) => Command::Mode(DisplayMode::Contact),
        ("both", None) => Command::Mode(DisplayMode::Both),
        ("mode" | "m", Some(mode)) => match mode.parse() {
            Ok(mode) => Command::Mode(mode),
            Err(e) => Command::Invalid(e),
        },
        ("mode" | "m", None) => {
            Command::Invalid("usage: :mode <domain|contact|both>".to_string())
        }
        _ => Command::Invalid(format!(
            "unknown command ':{}' (type :help for commands)",
            name
        )),
    }
}

/// Help text listing the prompt commands.
pub const HELP: &str = "\
Type a domain name and press Enter to look it up.

Commands:
  :mode <domain|contact|both>   Choose which tables to show
  :domain  :contact  :both      Shortcuts for :mode
  :help                         Show this help
  :quit                         Exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(
            parse_command("example.com\n"),
            Command::Search("example.com".to_string())
        );
        assert_eq!(parse_command("\n"), Command::Search(String::new()));
        assert_eq!(parse_command("   "), Command::Search("   ".to_string()));
    }

    #[test]
    fn test_mode_commands() {
        assert_eq!(
            parse_command(":mode contact"),
            Command::Mode(DisplayMode::Contact)
        );
        assert_eq!(parse_command(":m BOTH"), Command::Mode(DisplayMode::Both));
        assert_eq!(parse_command(":domain"), Command::Mode(DisplayMode::Domain));
        assert_eq!(
            parse_command("  :contact  "),
            Command::Mode(DisplayMode::Contact)
        );
    }

    #[test]
    fn test_quit_and_help() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":quit"), Command::Quit);
        assert_eq!(parse_command(":help"), Command::Help);
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(parse_command(":mode"), Command::Invalid(_)));
        assert!(matches!(parse_command(":mode all"), Command::Invalid(_)));
        assert!(matches!(parse_command(":frobnicate"), Command::Invalid(_)));
    }
}
