use crate::command_path::CommandPath;
use crate::error::PluginError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ContextType
// ---------------------------------------------------------------------------

/// The kind of backend the active CLI context talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextType {
    #[serde(alias = "k8s")]
    Kubernetes,
    #[serde(alias = "tmc")]
    MissionControl,
    Tanzu,
}

impl ContextType {
    pub fn all() -> &'static [ContextType] {
        &[
            ContextType::Kubernetes,
            ContextType::MissionControl,
            ContextType::Tanzu,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContextType::Kubernetes => "kubernetes",
            ContextType::MissionControl => "mission-control",
            ContextType::Tanzu => "tanzu",
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContextType {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kubernetes" | "k8s" => Ok(ContextType::Kubernetes),
            "mission-control" | "tmc" => Ok(ContextType::MissionControl),
            "tanzu" => Ok(ContextType::Tanzu),
            _ => Err(PluginError::UnknownContextType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// Where a plugin's root command lives when no command map entry says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    #[default]
    Global,
    #[serde(alias = "k8s")]
    Kubernetes,
    #[serde(alias = "tmc")]
    MissionControl,
    #[serde(alias = "ops")]
    Operations,
}

impl Target {
    pub fn all() -> &'static [Target] {
        &[
            Target::Global,
            Target::Kubernetes,
            Target::MissionControl,
            Target::Operations,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Target::Global => "global",
            Target::Kubernetes => "kubernetes",
            Target::MissionControl => "mission-control",
            Target::Operations => "operations",
        }
    }

    /// Host command under which plugins of this target are attached by default.
    pub fn default_parent(self) -> CommandPath {
        match self {
            Target::Global | Target::Kubernetes => CommandPath::root(),
            Target::MissionControl => CommandPath::from_tokens(["mission-control"]),
            Target::Operations => CommandPath::from_tokens(["operations"]),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Target {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Target::Global),
            "kubernetes" | "k8s" => Ok(Target::Kubernetes),
            "mission-control" | "tmc" => Ok(Target::MissionControl),
            "operations" | "ops" => Ok(Target::Operations),
            _ => Err(PluginError::UnknownTarget(s.to_string())),
        }
    }
}
