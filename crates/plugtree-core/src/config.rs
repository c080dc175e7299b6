use crate::command_map::{ApplyOptions, ConflictPolicy};
use crate::command_path::CommandPath;
use crate::command_tree::CommandTree;
use crate::error::Result;
use crate::{io, paths};
use crate::types::{ContextType, Target};
use crate::version::ResolveOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// HostConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCommand {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HostCommand {
    fn new(path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            description: Some(description.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_host_name")]
    pub name: String,
    #[serde(default = "default_host_commands")]
    pub commands: Vec<HostCommand>,
}

fn default_host_name() -> String {
    "tanzu".to_string()
}

fn default_host_commands() -> Vec<HostCommand> {
    vec![
        HostCommand::new("plugin", "Manage CLI plugins"),
        HostCommand::new("context", "Configure and manage contexts for the CLI"),
        HostCommand::new("config", "Configuration for the CLI"),
        HostCommand::new("mission-control", "Mission control commands"),
        HostCommand::new("operations", "Operations commands"),
    ]
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            name: default_host_name(),
            commands: default_host_commands(),
        }
    }
}

// ---------------------------------------------------------------------------
// ConflictsConfig / ContextConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictsConfig {
    #[serde(default)]
    pub policy: ConflictPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_type: Option<ContextType>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub resolution: ResolveOptions,
    #[serde(default)]
    pub conflicts: ConflictsConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            host: HostConfig::default(),
            resolution: ResolveOptions::default(),
            conflicts: ConflictsConfig::default(),
            context: ContextConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        io::load_state(&paths::config_path(root))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        io::save_state(&paths::config_path(root), self)
    }

    /// Options for one build pass. An explicit context type (flag or
    /// environment) wins over the configured one.
    pub fn apply_options(&self, context_override: Option<ContextType>) -> ApplyOptions {
        ApplyOptions {
            conflict_policy: self.conflicts.policy,
            active_context: context_override.or(self.context.active_type),
        }
    }

    /// The host tree before any plugin is merged. Commands with invalid paths
    /// are left out; `validate` reports them.
    pub fn host_tree(&self) -> CommandTree {
        let mut tree = CommandTree::new(self.host.name.clone());
        for command in &self.host.commands {
            match CommandPath::parse(&command.path) {
                Ok(path) if !path.is_root() => {
                    tree.add_host_command(&path, command.description.as_deref())
                }
                _ => tracing::debug!(path = %command.path, "skipping invalid host command"),
            }
        }
        tree
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. Host name must be usable as a command token
        let name_ok = CommandPath::parse(&self.host.name)
            .map(|p| p.len() == 1)
            .unwrap_or(false);
        if !name_ok {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("host name '{}' is not a valid command name", self.host.name),
            });
        }

        // 2. Host command paths: valid, non-empty, unique
        let mut seen = HashSet::new();
        for command in &self.host.commands {
            match CommandPath::parse(&command.path) {
                Ok(path) if path.is_root() => warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "host command with an empty path".to_string(),
                }),
                Ok(path) => {
                    if !seen.insert(path.clone()) {
                        warnings.push(ConfigWarning {
                            level: WarnLevel::Warning,
                            message: format!("host command '{path}' is declared more than once"),
                        });
                    }
                }
                Err(e) => warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: e.to_string(),
                }),
            }
        }

        // 3. Targets whose default parent is missing cannot attach plugins
        let tree = self.host_tree();
        for target in Target::all() {
            let parent = target.default_parent();
            if !tree.contains(&parent) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "no host command '{parent}': plugins targeting {target} will not attach"
                    ),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
