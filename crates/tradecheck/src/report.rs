//! Check outcomes, run summaries, and the log sink abstraction.

use std::sync::Mutex;

use chrono::Local;
use serde::Serialize;

/// Result of a single executed check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    /// Human-readable description of the check.
    pub description: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Structured supporting detail (null status, mismatched keys, counts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl CheckOutcome {
    pub fn new(description: impl Into<String>, passed: bool) -> Self {
        Self {
            description: description.into(),
            passed,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Aggregate counts over a validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Tally outcomes into a summary.
    pub fn from_outcomes(outcomes: &[CheckOutcome]) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed).count();
        Self {
            total: outcomes.len(),
            passed,
            failed: outcomes.len() - passed,
        }
    }
}

/// A message destined for a log sink.
#[derive(Debug, Clone)]
pub enum LogMessage {
    /// Free text.
    Text(String),
    /// Structured payload, rendered as indented JSON.
    Structured(serde_json::Value),
}

/// Destination for validation progress and results.
pub trait LogSink {
    fn log(&self, message: LogMessage);

    fn text(&self, message: String) {
        self.log(LogMessage::Text(message));
    }

    fn structured(&self, payload: serde_json::Value) {
        self.log(LogMessage::Structured(payload));
    }
}

/// Sink that prints to stdout with a `[YYYY-MM-DD HH:MM:SS]` prefix.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn log(&self, message: LogMessage) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        match message {
            LogMessage::Text(text) => println!("[{timestamp}] {text}"),
            LogMessage::Structured(payload) => {
                let rendered = serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|_| payload.to_string());
                println!("[{timestamp}] {rendered}");
            }
        }
    }
}

/// Sink that captures rendered messages in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages logged so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("sink lock poisoned").clone()
    }

    /// True if any captured message contains the needle.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries().iter().any(|e| e.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: LogMessage) {
        let rendered = match message {
            LogMessage::Text(text) => text,
            LogMessage::Structured(payload) => serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|_| payload.to_string()),
        };
        self.entries.lock().expect("sink lock poisoned").push(rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_tallies_outcomes() {
        let outcomes = vec![
            CheckOutcome::new("a", true),
            CheckOutcome::new("b", false),
            CheckOutcome::new("c", true),
        ];
        let summary = RunSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_memory_sink_captures_messages() {
        let sink = MemorySink::new();
        sink.text("duplicates found: 2".to_string());
        sink.structured(json!({ "volume": true }));

        assert!(sink.contains("duplicates found"));
        assert!(sink.contains("\"volume\": true"));
        assert_eq!(sink.entries().len(), 2);
    }
}
