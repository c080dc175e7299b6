use crate::descriptor::PluginDescriptor;
use crate::error::{PluginError, Result};
use crate::{io, paths};
use crate::types::Target;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// InstalledPlugin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPlugin {
    pub name: String,
    pub target: Target,
    pub version: String,
    #[serde(default)]
    pub context_scoped: bool,
    pub installed_at: DateTime<Utc>,
    pub descriptor: PluginDescriptor,
}

// ---------------------------------------------------------------------------
// InstalledPlugins
// ---------------------------------------------------------------------------

/// Installed plugins in activation order. Build passes apply them in this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPlugins {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub plugins: Vec<InstalledPlugin>,
    pub last_updated: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

impl Default for InstalledPlugins {
    fn default() -> Self {
        Self::new()
    }
}

impl InstalledPlugins {
    pub fn new() -> Self {
        Self {
            version: 1,
            plugins: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        io::load_state(&paths::installed_path(root))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        io::save_state(&paths::installed_path(root), self)
    }

    // ---------------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------------

    pub fn find(&self, name: &str, target: Target) -> Option<&InstalledPlugin> {
        self.plugins
            .iter()
            .find(|p| p.name == name && p.target == target)
    }

    pub fn descriptors(&self) -> Vec<&PluginDescriptor> {
        self.plugins.iter().map(|p| &p.descriptor).collect()
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    /// Record an install. A plugin already installed for the same target is
    /// replaced in place, keeping its activation position. Returns the
    /// previously installed version, if any.
    pub fn install(&mut self, descriptor: PluginDescriptor, context_scoped: bool) -> Option<String> {
        let record = InstalledPlugin {
            name: descriptor.name.clone(),
            target: descriptor.target,
            version: descriptor.version.clone(),
            context_scoped,
            installed_at: Utc::now(),
            descriptor,
        };
        self.last_updated = Utc::now();

        match self
            .plugins
            .iter_mut()
            .find(|p| p.name == record.name && p.target == record.target)
        {
            Some(existing) => {
                let previous = std::mem::replace(existing, record);
                Some(previous.version)
            }
            None => {
                self.plugins.push(record);
                None
            }
        }
    }

    /// Remove a plugin. Without a target the name must be unambiguous.
    pub fn uninstall(&mut self, name: &str, target: Option<Target>) -> Result<InstalledPlugin> {
        let matches: Vec<usize> = self
            .plugins
            .iter()
            .enumerate()
            .filter(|(_, p)| p.name == name && target.map_or(true, |t| p.target == t))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => Err(PluginError::PluginNotFound(match target {
                Some(t) => format!("{name} ({t})"),
                None => name.to_string(),
            })),
            [index] => {
                self.last_updated = Utc::now();
                Ok(self.plugins.remove(*index))
            }
            _ => Err(PluginError::AmbiguousPlugin(name.to_string())),
        }
    }
}
