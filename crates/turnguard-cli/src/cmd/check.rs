use crate::output::print_json;
use std::path::Path;
use turnguard_core::{evaluate_event, Decision, GateConfig, StopEvent};

/// `turnguard check` — evaluate the gate against a transcript directly,
/// for debugging hook configuration. Exits 0 for both verdicts, mirroring
/// the hook's exit convention.
pub fn run(transcript: &Path, reentrant: bool, json: bool) -> anyhow::Result<()> {
    let event = StopEvent {
        stop_hook_active: reentrant,
        transcript_path: Some(transcript.display().to_string()),
        session_id: None,
    };
    let cfg = GateConfig::load_user();
    let decision = evaluate_event(&event, &cfg);

    if json {
        print_json(&decision)?;
        return Ok(());
    }

    match decision {
        Decision::Allow => println!("allow"),
        Decision::Block { .. } => {
            println!("block (no completion marker in the last assistant message)")
        }
    }
    Ok(())
}
