//! The stop-hook decision function.
//!
//! One invocation per conversation turn: ALLOW silently, or BLOCK with the
//! configured reminder. Every recoverable failure (malformed event, missing
//! or unreadable transcript) degrades toward BLOCK — when in doubt, remind.

use crate::config::GateConfig;
use crate::transcript::{self, FileTranscript, TranscriptSource};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// StopEvent
// ---------------------------------------------------------------------------

/// The hook event the runtime writes to stdin, one JSON object per
/// invocation. Field aliases accept the camelCase spellings some runtimes
/// emit; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopEvent {
    /// True when this invocation was triggered by the gate's own prior
    /// block. Guards against an infinite re-trigger loop.
    #[serde(default, alias = "reentrant")]
    pub stop_hook_active: bool,

    /// Path to the transcript JSONL. Absent or empty means no transcript.
    #[serde(default, alias = "transcriptPath")]
    pub transcript_path: Option<String>,

    /// Carried for trace logging only.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl StopEvent {
    /// Parse an event payload, defaulting every field on malformed input.
    /// The gate always produces a verdict, so a broken payload is warned
    /// about and treated as an empty event (which leads to BLOCK).
    pub fn parse(raw: &str) -> StopEvent {
        match serde_json::from_str(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("malformed hook event, using defaults: {e}");
                StopEvent::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Terminal gate outcome. `Allow` produces no output; `Block` serializes to
/// the `{"decision":"block","reason":...}` payload the runtime expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Block { reason: String },
}

impl Decision {
    pub fn is_block(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Decide for `event`, reading the transcript from `source`.
///
/// Pure over its inputs: no state is held across calls, so the same event
/// and transcript always yield the same decision.
pub fn evaluate(
    event: &StopEvent,
    source: Option<&dyn TranscriptSource>,
    cfg: &GateConfig,
) -> Decision {
    if event.stop_hook_active {
        tracing::debug!("re-entrant invocation, allowing");
        return Decision::Allow;
    }

    let confirmed = source
        .and_then(|s| s.tail_lines(cfg.window_lines))
        .map(|lines| {
            let records = transcript::parse_window(&lines);
            transcript::last_assistant_text(&records)
                .map(|text| text.contains(&cfg.marker))
                .unwrap_or(false)
        })
        .unwrap_or(false);

    if confirmed {
        Decision::Allow
    } else {
        Decision::Block {
            reason: cfg.reminder.clone(),
        }
    }
}

/// Evaluate against the transcript file named by the event itself.
pub fn evaluate_event(event: &StopEvent, cfg: &GateConfig) -> Decision {
    let file = event
        .transcript_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| FileTranscript::new(p, Duration::from_secs(cfg.io_timeout_seconds)));
    evaluate(
        event,
        file.as_ref().map(|f| f as &dyn TranscriptSource),
        cfg,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
