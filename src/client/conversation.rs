//! In-memory conversation log and per-turn send state machine.
//!
//! Each send appends a delivered user turn and a pending assistant turn, then
//! resolves the pending turn in place to delivered or failed. A turn is never
//! in an ambiguous half-filled state: `TurnBody` tags it explicitly.

use chrono::{DateTime, Utc};

use crate::llm::{Message, Role};

/// Content state of a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnBody {
    /// Awaiting the relay's reply (rendered as a loading indicator).
    Pending,
    Delivered(String),
    /// The send failed; holds the visible error message.
    Failed(String),
}

/// One message in the conversation.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub body: TurnBody,
    /// Model selected when this turn was created, for display only.
    pub model: Option<String>,
    pub at: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, body: TurnBody, model: &str) -> Self {
        Self {
            role,
            body,
            model: Some(model.to_string()),
            at: Utc::now(),
        }
    }

    /// Rendered text of a resolved turn.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            TurnBody::Pending => None,
            TurnBody::Delivered(text) | TurnBody::Failed(text) => Some(text),
        }
    }
}

/// Everything needed to issue the relay call for one submitted turn.
///
/// Consumed by `Conversation::complete` or `Conversation::fail`, so a turn
/// cannot be resolved twice.
#[derive(Debug)]
pub struct Outbound {
    pub message: String,
    /// Snapshot of the log taken immediately before the new turns were
    /// appended, mapped to wire messages.
    pub history: Vec<Message>,
    pub model: String,
    placeholder: usize,
}

/// Ordered, append-only turn log with a single-outstanding-send gate.
pub struct Conversation {
    turns: Vec<Turn>,
    selected_model: String,
}

impl Conversation {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            turns: Vec::new(),
            selected_model: model.into(),
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn selected_model(&self) -> &str {
        &self.selected_model
    }

    /// True while a pending assistant turn exists.
    pub fn is_sending(&self) -> bool {
        self.turns.iter().any(|t| t.body == TurnBody::Pending)
    }

    /// Change the selected model. Ignored while a send is in flight; the
    /// stamp on already-sent turns never changes.
    pub fn select_model(&mut self, model: impl Into<String>) -> bool {
        if self.is_sending() {
            return false;
        }
        self.selected_model = model.into();
        true
    }

    /// Submit a turn. Returns `None` for empty (trimmed) input or while a
    /// send is already in flight; the input is ignored, not queued.
    pub fn submit(&mut self, input: &str) -> Option<Outbound> {
        let message = input.trim();
        if message.is_empty() || self.is_sending() {
            return None;
        }

        let history = self.wire_history();
        let model = self.selected_model.clone();

        self.turns.push(Turn::new(
            Role::User,
            TurnBody::Delivered(message.to_string()),
            &model,
        ));
        let placeholder = self.turns.len();
        self.turns
            .push(Turn::new(Role::Assistant, TurnBody::Pending, &model));

        Some(Outbound {
            message: message.to_string(),
            history,
            model,
            placeholder,
        })
    }

    /// Resolve the pending turn with the relay's reply.
    pub fn complete(&mut self, outbound: Outbound, reply: String) {
        self.turns[outbound.placeholder].body = TurnBody::Delivered(reply);
    }

    /// Resolve the pending turn with a visible error message.
    pub fn fail(&mut self, outbound: Outbound, detail: &str) {
        self.turns[outbound.placeholder].body =
            TurnBody::Failed(format!("Error: {detail}. Please try again."));
    }

    fn wire_history(&self) -> Vec<Message> {
        self.turns
            .iter()
            .filter_map(|t| {
                t.text().map(|content| Message {
                    role: t.role,
                    content: content.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_send_grows_log_by_two() {
        let mut conversation = Conversation::new("minimaxai/minimax-m2");
        let before = conversation.turns().len();

        let outbound = conversation.submit("Hello").unwrap();
        conversation.complete(outbound, "Hi there".to_string());

        assert_eq!(conversation.turns().len(), before + 2);
        let last = conversation.turns().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.body, TurnBody::Delivered("Hi there".to_string()));
        assert!(conversation.turns()[0].at <= last.at);
    }

    #[test]
    fn test_failed_send_grows_log_by_two() {
        let mut conversation = Conversation::new("minimaxai/minimax-m2");

        let outbound = conversation.submit("Hello").unwrap();
        conversation.fail(outbound, "NVIDIA_API_KEY not configured");

        assert_eq!(conversation.turns().len(), 2);
        let last = conversation.turns().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(
            last.body,
            TurnBody::Failed(
                "Error: NVIDIA_API_KEY not configured. Please try again.".to_string()
            )
        );
        assert!(!conversation.is_sending());
    }

    #[test]
    fn test_history_is_snapshot_before_append() {
        let mut conversation = Conversation::new("minimaxai/minimax-m2");

        let first = conversation.submit("Hello").unwrap();
        assert!(first.history.is_empty());
        conversation.complete(first, "Hi there".to_string());

        let second = conversation.submit("And again").unwrap();
        assert_eq!(
            second.history,
            vec![
                Message {
                    role: Role::User,
                    content: "Hello".to_string(),
                },
                Message {
                    role: Role::Assistant,
                    content: "Hi there".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_failed_turn_text_included_in_history() {
        let mut conversation = Conversation::new("minimaxai/minimax-m2");
        let outbound = conversation.submit("Hello").unwrap();
        conversation.fail(outbound, "boom");

        let next = conversation.submit("retry").unwrap();
        assert_eq!(next.history.len(), 2);
        assert_eq!(next.history[1].content, "Error: boom. Please try again.");
    }

    #[test]
    fn test_empty_input_ignored() {
        let mut conversation = Conversation::new("minimaxai/minimax-m2");
        assert!(conversation.submit("").is_none());
        assert!(conversation.submit("   \t ").is_none());
        assert!(conversation.turns().is_empty());
    }

    #[test]
    fn test_submit_ignored_while_sending() {
        let mut conversation = Conversation::new("minimaxai/minimax-m2");
        let outbound = conversation.submit("first").unwrap();

        assert!(conversation.is_sending());
        assert!(conversation.submit("second").is_none());
        assert_eq!(conversation.turns().len(), 2);

        conversation.complete(outbound, "ok".to_string());
        assert!(conversation.submit("second").is_some());
    }

    #[test]
    fn test_model_selection_gated_on_idle() {
        let mut conversation = Conversation::new("minimaxai/minimax-m2");
        let outbound = conversation.submit("hi").unwrap();

        assert!(!conversation.select_model("microsoft/phi-4"));
        assert_eq!(conversation.selected_model(), "minimaxai/minimax-m2");

        conversation.complete(outbound, "hello".to_string());
        assert!(conversation.select_model("microsoft/phi-4"));
        assert_eq!(conversation.selected_model(), "microsoft/phi-4");
    }

    #[test]
    fn test_turns_stamped_with_model_at_send_time() {
        let mut conversation = Conversation::new("minimaxai/minimax-m2");
        let first = conversation.submit("one").unwrap();
        conversation.complete(first, "1".to_string());

        conversation.select_model("microsoft/phi-4");
        let second = conversation.submit("two").unwrap();
        assert_eq!(second.model, "microsoft/phi-4");
        conversation.complete(second, "2".to_string());

        let models: Vec<_> = conversation
            .turns()
            .iter()
            .map(|t| t.model.as_deref().unwrap())
            .collect();
        assert_eq!(
            models,
            vec![
                "minimaxai/minimax-m2",
                "minimaxai/minimax-m2",
                "microsoft/phi-4",
                "microsoft/phi-4",
            ]
        );
    }
}
