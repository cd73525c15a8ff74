use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default completion marker — the token whose presence in the most recent
/// assistant text means the reminder was already honored this turn.
pub const DEFAULT_MARKER: &str = "PRINCIPLES_DISPLAYED";

/// Default reminder text, re-injected verbatim as the block reason.
/// Policy content, not behavior: edit freely, the gate passes it through.
pub const DEFAULT_REMINDER: &str = "\
Before ending this turn, restate the engineering principles that applied to \
the work you just did:

1. Prefer the simplest design that meets the requirement.
2. Optimize for readability; code is read far more often than it is written.
3. Keep behavior testable in isolation.
4. Follow the project's documented style guides.

End your response with the single token PRINCIPLES_DISPLAYED once you have \
done so.";

// ---------------------------------------------------------------------------
// GateConfig
// ---------------------------------------------------------------------------

/// Tunable gate policy. Every field has a default so a config file may set
/// only what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Completion marker, matched as an exact case-sensitive substring.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Reminder text used as the block reason, verbatim.
    #[serde(default = "default_reminder")]
    pub reminder: String,
    /// How many trailing transcript lines to inspect.
    #[serde(default = "default_window_lines")]
    pub window_lines: usize,
    /// Transcript read timeout; a timeout is treated as an unreadable file.
    #[serde(default = "default_io_timeout")]
    pub io_timeout_seconds: u64,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_reminder() -> String {
    DEFAULT_REMINDER.to_string()
}

fn default_window_lines() -> usize {
    100
}

fn default_io_timeout() -> u64 {
    5
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            marker: default_marker(),
            reminder: default_reminder(),
            window_lines: default_window_lines(),
            io_timeout_seconds: default_io_timeout(),
        }
    }
}

impl GateConfig {
    /// Load the config at `path`, falling back to defaults when the file is
    /// missing or unparseable. The gate must always reach a decision, so a
    /// broken config file is warned about, never fatal.
    pub fn load_or_default(path: &Path) -> GateConfig {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(_) => return GateConfig::default(),
        };
        match serde_yaml::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("ignoring unparseable config {}: {e}", path.display());
                GateConfig::default()
            }
        }
    }

    /// Load from the user runtime directory (`~/.claude/turnguard.yaml`),
    /// or defaults when the home directory cannot be resolved.
    pub fn load_user() -> GateConfig {
        match crate::paths::config_path() {
            Ok(p) => GateConfig::load_or_default(&p),
            Err(_) => GateConfig::default(),
        }
    }
}
