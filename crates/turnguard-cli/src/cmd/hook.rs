use anyhow::Context;
use std::io::{Read, Write};
use turnguard_core::{evaluate_event, Decision, GateConfig, StopEvent};

/// `turnguard hook` — the stop hook entry point.
///
/// Reads one event object from stdin, writes the block payload to stdout
/// when the gate blocks, and writes nothing when it allows. Exits 0 in both
/// cases; the verdict travels only in the payload.
pub fn run() -> anyhow::Result<()> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read hook event from stdin")?;

    let event = StopEvent::parse(&raw);
    tracing::debug!(
        session = event.session_id.as_deref().unwrap_or("-"),
        reentrant = event.stop_hook_active,
        "evaluating stop hook"
    );

    let cfg = GateConfig::load_user();
    let decision = evaluate_event(&event, &cfg);

    if let Decision::Block { .. } = &decision {
        let mut out = std::io::stdout().lock();
        serde_json::to_writer(&mut out, &decision).context("failed to write decision")?;
        writeln!(out)?;
    }

    Ok(())
}
