use anyhow::Context;
use std::path::Path;
use turnguard_core::io::{self, LinkOutcome};
use turnguard_core::{paths, settings::Settings};

/// `turnguard install` — wire the gate into the agent runtime.
///
/// Symlinks every `*.md` file from `from` into `~/.claude/docs/` and
/// registers the stop hook in `~/.claude/settings.json` if no settings file
/// exists yet. Idempotent; never overwrites user-owned files.
pub fn run(from: &Path) -> anyhow::Result<()> {
    let claude_dir = paths::claude_dir().context("failed to resolve runtime directory")?;
    println!("Installing into: {}", claude_dir.display());

    let source = from
        .canonicalize()
        .with_context(|| format!("docs source not found: {}", from.display()))?;

    let docs_dir = paths::docs_dir()?;
    io::ensure_dir(&docs_dir)
        .with_context(|| format!("failed to create {}", docs_dir.display()))?;

    link_docs(&source, &docs_dir)?;
    register_hook()?;

    Ok(())
}

fn link_docs(source: &Path, docs_dir: &Path) -> anyhow::Result<()> {
    let mut docs: Vec<_> = std::fs::read_dir(source)
        .with_context(|| format!("failed to read {}", source.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    docs.sort();

    if docs.is_empty() {
        println!("  no documentation files in {}", source.display());
        return Ok(());
    }

    for doc in docs {
        let Some(name) = doc.file_name() else {
            continue;
        };
        let link = docs_dir.join(name);
        let outcome = io::ensure_symlink(&doc, &link)
            .with_context(|| format!("failed to link {}", link.display()))?;
        let verb = match outcome {
            LinkOutcome::Created => "linked: ",
            LinkOutcome::Updated => "updated:",
            LinkOutcome::Unchanged => "exists: ",
        };
        println!("  {verb} {}", link.display());
    }
    Ok(())
}

fn register_hook() -> anyhow::Result<()> {
    let settings_path = paths::settings_path()?;
    let settings = Settings::with_stop_hook("turnguard hook");
    let mut data = serde_json::to_string_pretty(&settings)?;
    data.push('\n');

    // Never clobber an existing settings file — the runtime and the user
    // both write to it.
    let written = io::write_if_missing(&settings_path, data.as_bytes())
        .with_context(|| format!("failed to write {}", settings_path.display()))?;
    if written {
        println!("  created: {}", settings_path.display());
    } else {
        println!("  exists:  {} (left untouched)", settings_path.display());
    }
    Ok(())
}
