//! Inbound event type, built once per received Telegram message.

use teloxide::types::Message;

/// One received text message, decoupled from the Telegram update object.
/// Handlers only ever see this value, never the full platform message.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub chat_id: i64,
    /// Sender's first name, when Telegram supplies one.
    pub sender_name: Option<String>,
    /// Leading `/command` token without the slash, if the message starts
    /// with one. `/weather@some_bot` keeps only `weather`.
    pub command: Option<String>,
    /// Message text with any leading command token stripped.
    pub text: String,
}

impl InboundEvent {
    /// Build an event from a Telegram message. Returns `None` for messages
    /// without text (stickers, photos, joins).
    pub fn from_message(msg: &Message) -> Option<Self> {
        let text = msg.text()?;
        let sender_name = msg.from.as_ref().map(|u| u.first_name.clone());
        Some(Self::parse(msg.chat.id.0, sender_name, text))
    }

    /// Split a raw message body into command token and remaining text.
    pub fn parse(chat_id: i64, sender_name: Option<String>, raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix('/') {
            let (token, tail) = match rest.split_once(char::is_whitespace) {
                Some((token, tail)) => (token, tail.trim_start()),
                None => (rest, ""),
            };
            // Telegram appends "@botname" when commands are sent in groups.
            let token = token.split('@').next().unwrap_or(token);
            Self {
                chat_id,
                sender_name,
                command: Some(token.to_lowercase()),
                text: tail.to_string(),
            }
        } else {
            Self {
                chat_id,
                sender_name,
                command: None,
                text: trimmed.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let event = InboundEvent::parse(7, None, "what is rust?");
        assert_eq!(event.command, None);
        assert_eq!(event.text, "what is rust?");
    }

    #[test]
    fn test_bare_command() {
        let event = InboundEvent::parse(7, None, "/weather");
        assert_eq!(event.command.as_deref(), Some("weather"));
        assert_eq!(event.text, "");
    }

    #[test]
    fn test_command_with_args() {
        let event = InboundEvent::parse(7, None, "/image a cat in a hat");
        assert_eq!(event.command.as_deref(), Some("image"));
        assert_eq!(event.text, "a cat in a hat");
    }

    #[test]
    fn test_command_with_bot_suffix() {
        let event = InboundEvent::parse(7, None, "/news@omni_bot");
        assert_eq!(event.command.as_deref(), Some("news"));
    }

    #[test]
    fn test_command_is_lowercased() {
        let event = InboundEvent::parse(7, None, "/Weather");
        assert_eq!(event.command.as_deref(), Some("weather"));
    }
}
