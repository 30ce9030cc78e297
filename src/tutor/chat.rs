//! Tutor chat session

use tracing::debug;

use super::{reply, GREETING};
use crate::latency::{Latency, Pending};
use crate::types::{ChatMessage, MessageKind, Sender};

/// Canned starter question offered next to the input box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickPrompt {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const QUICK_PROMPTS: &[QuickPrompt] = &[
    QuickPrompt {
        label: "Explain Python lists",
        prompt: "Can you explain how Python lists work and give me some examples?",
    },
    QuickPrompt {
        label: "Debug my code",
        prompt: "I have a bug in my code. Can you help me debug it?",
    },
    QuickPrompt {
        label: "Give me a hint",
        prompt: "I'm stuck on this exercise. Can you give me a hint without the full solution?",
    },
    QuickPrompt {
        label: "Practice exercises",
        prompt: "Can you give me a coding exercise to practice what I've learned?",
    },
];

/// A conversation with the tutor.
///
/// At most one reply is in flight; while it is, the tutor is "typing" and new
/// messages are refused.
pub struct TutorChat {
    messages: Vec<ChatMessage>,
    latency: Latency,
    pending_reply: Option<Pending<ChatMessage>>,
}

impl TutorChat {
    pub fn new(latency: Latency) -> Self {
        Self {
            messages: vec![ChatMessage::new(Sender::Ai, MessageKind::Text, GREETING)],
            latency,
            pending_reply: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.pending_reply.is_some()
    }

    /// Post a learner message and schedule the tutor's answer.
    ///
    /// Returns false for blank input, while a reply is pending, or when there
    /// is no tokio runtime to deliver the reply on. A refused message is not
    /// appended.
    pub fn send(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.is_typing() {
            return false;
        }

        let question = text.to_string();
        let Some(pending) = self
            .latency
            .defer(self.latency.reply_delay, move || reply(&question).into_message())
        else {
            return false;
        };
        self.messages.push(ChatMessage::from_user(text));
        self.pending_reply = Some(pending);
        debug!("Tutor reply scheduled");
        true
    }

    /// Text of a quick prompt, for the learner to edit and send
    pub fn quick_prompt(&self, index: usize) -> Option<&'static str> {
        QUICK_PROMPTS.get(index).map(|quick| quick.prompt)
    }

    /// Wait for the pending reply and append it. Returns the reply, if any.
    pub async fn settle(&mut self) -> Option<&ChatMessage> {
        let pending = self.pending_reply.take()?;
        let message = pending.wait().await?;
        self.messages.push(message);
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::TokioScheduler;
    use std::sync::Arc;
    use std::time::Duration;

    fn chat() -> TutorChat {
        TutorChat::new(Latency::immediate())
    }

    #[test]
    fn test_opens_with_greeting() {
        let c = chat();
        assert_eq!(c.messages().len(), 1);
        assert_eq!(c.messages()[0].sender, Sender::Ai);
        assert_eq!(c.messages()[0].content, GREETING);
        assert!(!c.is_typing());
    }

    #[tokio::test]
    async fn test_send_then_settle() {
        let mut c = chat();
        assert!(c.send("  How do lists work?  "));
        assert!(c.is_typing());
        assert_eq!(c.messages().len(), 2);
        assert_eq!(c.messages()[1].content, "How do lists work?");

        let answer = c.settle().await.unwrap();
        assert_eq!(answer.sender, Sender::Ai);
        assert_eq!(answer.kind, MessageKind::Explanation);
        assert!(!c.is_typing());
        assert_eq!(c.messages().len(), 3);
    }

    #[test]
    fn test_blank_input_refused() {
        let mut c = chat();
        assert!(!c.send(""));
        assert!(!c.send("   \n"));
        assert_eq!(c.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_send_refused_while_typing() {
        let mut c = chat();
        assert!(c.send("hello"));
        assert!(!c.send("are you there?"));
        assert_eq!(c.messages().len(), 2);
        c.settle().await;
        assert!(c.send("are you there?"));
    }

    #[tokio::test]
    async fn test_quick_prompt_only_fills_input() {
        let mut c = chat();
        let text = c.quick_prompt(2).unwrap();
        assert_eq!(text, QUICK_PROMPTS[2].prompt);
        assert_eq!(c.messages().len(), 1);
        assert!(!c.is_typing());
        assert!(c.quick_prompt(QUICK_PROMPTS.len()).is_none());

        assert!(c.send(text));
        let answer = c.settle().await.unwrap();
        assert_eq!(answer.kind, MessageKind::Hint);
    }

    #[test]
    fn test_send_without_runtime_is_refused() {
        let mut c = chat();
        assert!(!c.send("hello"));
        assert_eq!(c.messages().len(), 1);
        assert!(!c.is_typing());
    }

    #[tokio::test]
    async fn test_cancelled_reply_is_never_appended() {
        let latency = Latency::new(
            Arc::new(TokioScheduler),
            Duration::from_secs(60),
            Duration::from_secs(60),
        );
        let mut c = TutorChat::new(latency);
        assert!(c.send("hello"));
        if let Some(pending) = c.pending_reply.as_mut() {
            pending.cancel();
        }
        assert!(c.settle().await.is_none());
        assert_eq!(c.messages().len(), 2);
        assert!(!c.is_typing());
    }

    #[tokio::test]
    async fn test_settle_without_pending_is_none() {
        let mut c = chat();
        assert!(c.settle().await.is_none());
    }
}
