//! AI tutor
//!
//! The tutor is a keyword-matched responder: an ordered table of rules, each
//! a list of trigger substrings and a canned reply. The first rule with a
//! trigger contained in the lower-cased message wins; otherwise the tutor asks
//! a clarifying question.

pub mod chat;
mod templates;

pub use chat::{QuickPrompt, TutorChat, QUICK_PROMPTS};

use crate::types::{ChatMessage, MessageKind, Sender};

/// Opening message of every chat session
pub const GREETING: &str = templates::GREETING;

/// One entry of the responder table
#[derive(Debug, Clone, Copy)]
pub struct ResponseRule {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub kind: MessageKind,
    pub template: &'static str,
}

impl ResponseRule {
    /// Whether any trigger occurs in an already lower-cased message
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t))
    }
}

/// Responder rules in priority order
pub const RESPONSE_RULES: &[ResponseRule] = &[
    ResponseRule {
        name: "lists",
        triggers: &["list", "array"],
        kind: MessageKind::Explanation,
        template: templates::LISTS,
    },
    ResponseRule {
        name: "debugging",
        triggers: &["debug", "error", "bug"],
        kind: MessageKind::Explanation,
        template: templates::DEBUGGING,
    },
    ResponseRule {
        name: "hint",
        triggers: &["hint", "stuck"],
        kind: MessageKind::Hint,
        template: templates::HINT,
    },
    ResponseRule {
        name: "exercise",
        triggers: &["exercise", "practice"],
        kind: MessageKind::Explanation,
        template: templates::EXERCISE,
    },
    ResponseRule {
        name: "greeting",
        triggers: &["hello", "hi"],
        kind: MessageKind::Text,
        template: templates::HELLO,
    },
];

/// Reply used when no rule matches
pub const FALLBACK: ResponseRule = ResponseRule {
    name: "clarify",
    triggers: &[],
    kind: MessageKind::Text,
    template: templates::CLARIFY,
};

/// A computed tutor answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorReply {
    pub rule: &'static str,
    pub kind: MessageKind,
    pub content: &'static str,
}

impl TutorReply {
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::new(Sender::Ai, self.kind, self.content)
    }
}

/// Pick the rule for a message
pub fn select_rule(text: &str) -> &'static ResponseRule {
    let lowered = text.to_lowercase();
    RESPONSE_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .unwrap_or(&FALLBACK)
}

/// Deterministic reply to a message; depends on `text` alone
pub fn reply(text: &str) -> TutorReply {
    let rule = select_rule(text);
    TutorReply {
        rule: rule.name,
        kind: rule.kind,
        content: rule.template,
    }
}
