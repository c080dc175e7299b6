use crate::command_map::CommandMapError;
use crate::command_path::CommandPath;
use crate::types::ContextType;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Error => "error",
        })
    }
}

/// Something noteworthy that happened while a plugin was merged into the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A `"" -> ""` entry removed the plugin's default root attachment.
    RootSuppressed,
    /// The plugin does not support the active context type; nothing was applied.
    PluginInactive {
        active: Option<ContextType>,
        supported: Vec<ContextType>,
    },
    /// A single entry was skipped because of its own context requirement.
    EntryInactive {
        entry: usize,
        required: Vec<ContextType>,
    },
    /// An existing command was replaced.
    Override {
        path: CommandPath,
        replaced: String,
        explicit: bool,
    },
    /// An entry (or the default attachment when `entry` is `None`) failed.
    EntryFailed {
        entry: Option<usize>,
        error: CommandMapError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub plugin: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(plugin: impl Into<String>, kind: DiagnosticKind) -> Self {
        let level = match &kind {
            DiagnosticKind::RootSuppressed
            | DiagnosticKind::PluginInactive { .. }
            | DiagnosticKind::EntryInactive { .. } => DiagnosticLevel::Info,
            DiagnosticKind::Override { .. } => DiagnosticLevel::Warning,
            DiagnosticKind::EntryFailed { .. } => DiagnosticLevel::Error,
        };
        Self {
            level,
            plugin: plugin.into(),
            kind,
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Override { .. })
    }

    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::RootSuppressed => "root command mapping suppressed".to_string(),
            DiagnosticKind::PluginInactive { active, supported } => {
                let supported: Vec<&str> = supported.iter().map(|c| c.as_str()).collect();
                format!(
                    "inactive for context type {} (supports: {})",
                    active.map(|a| a.as_str()).unwrap_or("none"),
                    supported.join(", ")
                )
            }
            DiagnosticKind::EntryInactive { entry, required } => {
                let required: Vec<&str> = required.iter().map(|c| c.as_str()).collect();
                format!(
                    "command map entry #{entry} skipped: requires {}",
                    required.join(" or ")
                )
            }
            DiagnosticKind::Override {
                path,
                replaced,
                explicit,
            } => {
                let how = if *explicit { "overrides" } else { "replaces" };
                format!("'{path}' {how} command from {replaced}")
            }
            DiagnosticKind::EntryFailed { entry: Some(i), error } => {
                format!("command map entry #{i} skipped: {error}")
            }
            DiagnosticKind::EntryFailed { entry: None, error } => {
                format!("root command not attached: {error}")
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.plugin, self.message())
    }
}
