// Prompt construction for the generation endpoint

use crate::conversation::{Message, Role};

pub const PERSONA_PREAMBLE: &str = "You are SafeSpace, a compassionate AI mental health supporter. \
Provide empathetic, non-judgmental support, use active listening, offer coping strategies, and \
recognize when professional help is needed. You are not a replacement for professional therapy, \
but a supportive companion.";

/// Persona preamble, up to `context_turns` recent history messages, then the user's message
pub fn build_prompt(message: &str, history: &[Message], context_turns: usize) -> String {
    let mut prompt = String::from(PERSONA_PREAMBLE);
    prompt.push_str("\n\n");

    let start = history.len().saturating_sub(context_turns);
    for entry in &history[start..] {
        let speaker = match entry.role {
            Role::User => "User",
            Role::Assistant => "Therapist",
        };
        prompt.push_str(&format!("{}: {}\n", speaker, entry.text.trim()));
    }

    prompt.push_str(&format!("User: {}\nTherapist:", message.trim()));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_context() {
        let history = vec![Message::user("earlier message")];
        let prompt = build_prompt("I feel low", &history, 0);

        assert!(prompt.starts_with(PERSONA_PREAMBLE));
        assert!(prompt.ends_with("User: I feel low\nTherapist:"));
        assert!(!prompt.contains("earlier message"));
    }

    #[test]
    fn test_prompt_includes_recent_context() {
        let history = vec![
            Message::user("first"),
            Message::user("second"),
            Message::user("third"),
        ];
        let prompt = build_prompt("now", &history, 2);

        assert!(!prompt.contains("first"));
        let second = prompt.find("User: second").unwrap();
        let third = prompt.find("User: third").unwrap();
        let now = prompt.find("User: now").unwrap();
        assert!(second < third && third < now);
    }
}
