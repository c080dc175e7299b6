use crate::command_map::{self, ApplyOptions};
use crate::command_tree::CommandTree;
use crate::config::Config;
use crate::context;
use crate::descriptor::PluginDescriptor;
use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLevel};
use crate::types::{ContextType, Target};
use serde::Serialize;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// BuildOutput
// ---------------------------------------------------------------------------

/// Whether an installed plugin contributed to the current tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginStatus {
    pub name: String,
    pub target: Target,
    pub version: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildOutput {
    pub active_context: Option<ContextType>,
    pub tree: CommandTree,
    pub plugins: Vec<PluginStatus>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }

    pub fn overrides(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_override())
    }
}

// ---------------------------------------------------------------------------
// TreeBuilder
// ---------------------------------------------------------------------------

/// Runs one build pass: every plugin, in the given order, against a fresh
/// copy of the host tree.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    host: CommandTree,
    options: ApplyOptions,
}

impl TreeBuilder {
    pub fn new(host: CommandTree, options: ApplyOptions) -> Self {
        Self { host, options }
    }

    pub fn from_config(config: &Config, context_override: Option<ContextType>) -> Self {
        Self::new(config.host_tree(), config.apply_options(context_override))
    }

    pub fn build<'a, I>(&self, plugins: I) -> BuildOutput
    where
        I: IntoIterator<Item = &'a PluginDescriptor>,
    {
        let active_context = self.options.active_context;
        let mut tree = self.host.clone();
        let mut statuses = Vec::new();
        let mut diagnostics = Vec::new();

        for descriptor in plugins {
            let active = context::is_active(descriptor, active_context);
            statuses.push(PluginStatus {
                name: descriptor.name.clone(),
                target: descriptor.target,
                version: descriptor.version.clone(),
                active,
            });

            if !active {
                debug!(plugin = %descriptor.label(), "plugin inactive for current context");
                diagnostics.push(Diagnostic::new(
                    descriptor.name.clone(),
                    DiagnosticKind::PluginInactive {
                        active: active_context,
                        supported: descriptor.supported_context_types.iter().copied().collect(),
                    },
                ));
                continue;
            }

            diagnostics.extend(command_map::apply(descriptor, &mut tree, self.options));
        }

        info!(
            plugins = statuses.len(),
            commands = tree.root.size() - 1,
            diagnostics = diagnostics.len(),
            "command tree built"
        );

        BuildOutput {
            active_context,
            tree,
            plugins: statuses,
            diagnostics,
        }
    }
}
