// Slash command handling

use crate::resources::QuickStart;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Reset,
    Resources,
    Tips,
    Quick(QuickStart),
}

impl Command {
    /// Parse a line starting with '/'; `Err` carries a message for the user
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();

        match trimmed {
            "/help" => return Ok(Command::Help),
            "/quit" | "/exit" => return Ok(Command::Quit),
            "/reset" | "/clear" => return Ok(Command::Reset),
            "/resources" => return Ok(Command::Resources),
            "/tips" | "/self-care" => return Ok(Command::Tips),
            "/quick" => {
                return Err("Usage: /quick <anxious|sad|stressed|lonely>".to_string());
            }
            _ => {}
        }

        if let Some(rest) = trimmed.strip_prefix("/quick ") {
            return rest.parse::<QuickStart>().map(Command::Quick);
        }

        Err(format!(
            "Unknown command: {}. Type /help for available commands.",
            trimmed
        ))
    }
}

pub fn format_help() -> String {
    r#"SafeSpace Commands:

  /help              Show this help message
  /resources         Crisis lines and mental health resources
  /tips              Self-care suggestions
  /quick <feeling>   Start with a prompt: anxious, sad, stressed, lonely
  /reset             Clear the conversation and start fresh
  /quit              Exit

Type anything else to talk. Nothing you write is stored after you leave."#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/help"), Ok(Command::Help));
        assert_eq!(Command::parse("/exit"), Ok(Command::Quit));
        assert_eq!(Command::parse(" /reset "), Ok(Command::Reset));
        assert_eq!(Command::parse("/tips"), Ok(Command::Tips));
        assert_eq!(Command::parse("/resources"), Ok(Command::Resources));
    }

    #[test]
    fn test_parse_quick() {
        assert_eq!(
            Command::parse("/quick stressed"),
            Ok(Command::Quick(QuickStart::Stressed))
        );
        assert!(Command::parse("/quick").is_err());
        assert!(Command::parse("/quick joyful").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = Command::parse("/dance").unwrap_err();
        assert!(err.contains("/dance"));
    }
}
