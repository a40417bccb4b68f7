//! Read/write context passed through XML persistence
//!
//! Collects the messages raised while properties are read or written so the
//! caller can report them without the read itself failing.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageLevel {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MessageLevel::Info => "info",
            MessageLevel::Warning => "warning",
            MessageLevel::Critical => "critical",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextMessage {
    pub text: String,
    pub level: MessageLevel,
    /// Categories that were entered when the message was pushed, outermost first
    pub categories: Vec<String>,
}

impl fmt::Display for ContextMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.categories.is_empty() {
            write!(f, "[{}] {}", self.level, self.text)
        } else {
            write!(f, "[{}] {}: {}", self.level, self.categories.join(" > "), self.text)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadWriteContext {
    messages: Vec<ContextMessage>,
    categories: Vec<String>,
}

impl ReadWriteContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_message(&mut self, text: impl Into<String>, level: MessageLevel) {
        let message = ContextMessage {
            text: text.into(),
            level,
            categories: self.categories.clone(),
        };
        match level {
            MessageLevel::Info => log::debug!("{}", message),
            _ => log::warn!("{}", message),
        }
        self.messages.push(message);
    }

    pub fn push_warning(&mut self, text: impl Into<String>) {
        self.push_message(text, MessageLevel::Warning);
    }

    pub fn messages(&self) -> &[ContextMessage] {
        &self.messages
    }

    /// Return and clear the collected messages
    pub fn take_messages(&mut self) -> Vec<ContextMessage> {
        std::mem::take(&mut self.messages)
    }

    /// Enter a category; messages pushed until the matching `leave_category`
    /// are tagged with it
    pub fn enter_category(&mut self, category: impl Into<String>) {
        self.categories.push(category.into());
    }

    pub fn leave_category(&mut self) {
        self.categories.pop();
    }
}
