//! Correlation types for command tracking
//!
//! Every line typed at the prompt gets its own `RequestId` so that the log
//! events of one command can be grouped together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single REPL command
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new RequestId using UUIDv7 (time ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one command dispatch
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub request_id: RequestId,
    /// The input line exactly as the prompt received it (already trimmed)
    pub raw_line: String,
}

impl CommandContext {
    /// Create a new context with a fresh RequestId
    pub fn new(raw_line: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            raw_line: raw_line.into(),
        }
    }

    /// Create a context with an existing RequestId
    pub fn with_request_id(request_id: RequestId, raw_line: impl Into<String>) -> Self {
        Self {
            request_id,
            raw_line: raw_line.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generation() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
        assert!(!id2.as_str().is_empty());
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::new();
        let display_str = format!("{}", id);
        assert_eq!(display_str, id.as_str());
    }

    #[test]
    fn test_command_context_creation() {
        let ctx = CommandContext::new("article/list");
        assert!(!ctx.request_id.as_str().is_empty());
        assert_eq!(ctx.raw_line, "article/list");
    }

    #[test]
    fn test_command_context_keeps_given_id() {
        let id = RequestId::from_string("req-1".to_string());
        let ctx = CommandContext::with_request_id(id.clone(), "system/exit");
        assert_eq!(ctx.request_id, id);
    }

    #[test]
    fn test_serialization() {
        let id = RequestId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: RequestId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
