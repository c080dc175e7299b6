use crate::command_map::CommandMapEntry;
use crate::command_path::CommandPath;
use crate::command_tree::{CommandNode, CommandSpec};
use crate::error::{PluginError, Result};
use crate::types::{ContextType, Target};
use crate::version::parse_version;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

// ---------------------------------------------------------------------------
// PluginDescriptor
// ---------------------------------------------------------------------------

/// Plugin metadata plus the command tree the plugin exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub target: Target,
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command_map: Vec<CommandMapEntry>,
    /// Empty means the plugin is active in every context.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub supported_context_types: BTreeSet<ContextType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandSpec>,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, target: Target, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            target,
            version: version.into(),
            command_map: Vec::new(),
            supported_context_types: BTreeSet::new(),
            commands: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let descriptor: PluginDescriptor = serde_yaml::from_str(&data)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn parsed_version(&self) -> Result<Version> {
        parse_version(&self.version)
    }

    /// Check the parts serde cannot: name and command tokens, sibling
    /// uniqueness, and the version string.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| PluginError::InvalidDescriptor {
            plugin: self.name.clone(),
            reason,
        };

        if CommandPath::parse(&self.name)?.len() != 1 {
            return Err(invalid("name must be a single command token".to_string()));
        }
        self.parsed_version()
            .map_err(|e| invalid(format!("version '{}': {e}", self.version)))?;
        check_specs(&self.commands, &CommandPath::root()).map_err(invalid)
    }

    /// The plugin's own command tree, rooted at a node named after the plugin.
    pub fn command_tree(&self) -> CommandNode {
        CommandNode::from_plugin_specs(
            &self.name,
            self.target,
            self.description.as_deref(),
            &self.commands,
        )
    }

    /// `name@version (target)`, used in listings and logs.
    pub fn label(&self) -> String {
        format!("{}@{} ({})", self.name, self.version, self.target)
    }
}

fn check_specs(specs: &[CommandSpec], parent: &CommandPath) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    for spec in specs {
        let token_ok = CommandPath::parse(&spec.name)
            .map(|p| p.len() == 1)
            .unwrap_or(false);
        if !token_ok {
            return Err(format!("invalid command name '{}' under '{parent}'", spec.name));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(format!("duplicate command '{}' under '{parent}'", spec.name));
        }
        check_specs(&spec.subcommands, &parent.join(spec.name.clone()))?;
    }
    Ok(())
}
