//! The runtime settings file (`~/.claude/settings.json`), modeled only as
//! far as the installer needs: registering the stop hook. The permission
//! sections of that file belong to the runtime and are never touched.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub hooks: Hooks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hooks {
    #[serde(rename = "Stop")]
    pub stop: Vec<HookMatcher>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookMatcher {
    pub hooks: Vec<HookCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HookCommand {
    Command { command: String },
}

impl Settings {
    /// Settings registering `command` as the stop hook.
    pub fn with_stop_hook(command: &str) -> Settings {
        Settings {
            hooks: Hooks {
                stop: vec![HookMatcher {
                    hooks: vec![HookCommand::Command {
                        command: command.to_string(),
                    }],
                }],
            },
        }
    }
}
