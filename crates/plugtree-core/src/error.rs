use crate::command_map::CommandMapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("not initialized: run 'plugtree init'")]
    NotInitialized,

    #[error("version not found: no version of '{name}' ({target}) matches '{spec}'")]
    VersionNotFound {
        name: String,
        target: String,
        spec: String,
    },

    #[error("invalid version spec '{0}': expected vMAJOR, vMAJOR.MINOR or vMAJOR.MINOR.PATCH")]
    InvalidVersionSpec(String),

    #[error("invalid command path '{0}': tokens must be alphanumeric with '-' or '_'")]
    InvalidCommandPath(String),

    #[error("invalid command map entry: {0}")]
    InvalidEntry(String),

    #[error("unknown context type: {0}")]
    UnknownContextType(String),

    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error("plugin not found: {0}")]
    PluginNotFound(String),

    #[error("plugin '{0}' is installed for several targets: pass --target")]
    AmbiguousPlugin(String),

    #[error("plugin group not found: {0}")]
    GroupNotFound(String),

    #[error("duplicate inventory entry: {0}")]
    DuplicateInventoryEntry(String),

    #[error("invalid descriptor for {plugin}: {reason}")]
    InvalidDescriptor { plugin: String, reason: String },

    #[error("descriptor mismatch for {plugin}: {reason}")]
    DescriptorMismatch { plugin: String, reason: String },

    #[error("mandatory plugin '{plugin}' in group '{group}' could not be resolved: {reason}")]
    GroupMemberUnresolved {
        group: String,
        plugin: String,
        reason: String,
    },

    #[error(transparent)]
    CommandMap(#[from] CommandMapError),

    #[error(transparent)]
    Semver(#[from] semver::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PluginError>;
