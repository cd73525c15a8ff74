//! `turnguard-core` — the stop-hook transcript gate.
//!
//! Invoked once per conversation turn by the agent runtime, the gate reads
//! a hook event, inspects the trailing window of the conversation
//! transcript, and decides whether the turn may end silently or must be
//! blocked with a re-injected reminder.
//!
//! ```text
//! StopEvent (stdin JSON)
//!     │
//!     ▼
//! gate::evaluate      ← pure decision over an injected TranscriptSource
//!     │
//!     ▼
//! Decision            ← Allow (no output) | Block { reason } (stdout JSON)
//! ```
//!
//! Everything recoverable degrades toward BLOCK: a malformed event, a
//! missing transcript, or an unreadable file all mean "no completion marker
//! found", and the reminder is injected again.

pub mod config;
pub mod error;
pub mod gate;
pub mod io;
pub mod paths;
pub mod settings;
pub mod transcript;

pub use config::GateConfig;
pub use error::{GateError, Result};
pub use gate::{evaluate, evaluate_event, Decision, StopEvent};
pub use transcript::{FileTranscript, TranscriptSource};
