//! Command map entries and their application to the host command tree.
//!
//! Entries are applied in declared order. A failing entry never aborts the
//! pass: it is recorded as an error diagnostic and the next entry runs.

use crate::command_path::CommandPath;
use crate::command_tree::{CommandNode, CommandTree, Origin};
use crate::context;
use crate::descriptor::PluginDescriptor;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::{PluginError, Result};
use crate::types::ContextType;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// CommandMapError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum CommandMapError {
    #[error("source command '{source_path}' not found in plugin '{plugin}'")]
    SourceNotFound {
        plugin: String,
        source_path: CommandPath,
    },

    #[error("invalid destination '{path}': {reason}")]
    InvalidDestination { path: CommandPath, reason: String },

    #[error("destination '{path}' is already provided by {existing}")]
    DestinationConflict { path: CommandPath, existing: String },
}

// ---------------------------------------------------------------------------
// ConflictPolicy
// ---------------------------------------------------------------------------

/// What to do when an entry lands on a command that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Replace the existing command and record a warning.
    #[default]
    Warn,
    /// Only entries with an explicit `overrides` path may replace a command.
    Reject,
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConflictPolicy::Warn => "warn",
            ConflictPolicy::Reject => "reject",
        })
    }
}

// ---------------------------------------------------------------------------
// CommandMapEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCommandMapEntry {
    #[serde(default)]
    source_command_path: String,
    #[serde(default)]
    destination_command_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    overrides: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    required_context_types: Vec<ContextType>,
}

/// A rule relocating or hiding part of a plugin's command tree.
///
/// Built through [`CommandMapEntry::new`] or deserialization; both run the
/// same checks, so a value of this type is always well-formed:
///
/// - a non-root source needs a destination or an `overrides` path;
/// - the root-suppression form (`"" -> ""`) cannot carry `overrides`;
/// - aliases are valid command tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCommandMapEntry", into = "RawCommandMapEntry")]
pub struct CommandMapEntry {
    source: CommandPath,
    destination: CommandPath,
    overrides: Option<CommandPath>,
    description: Option<String>,
    aliases: Vec<String>,
    required_context_types: Vec<ContextType>,
}

impl CommandMapEntry {
    pub fn new(source: &str, destination: &str) -> Result<Self> {
        let entry = Self {
            source: CommandPath::parse(source)?,
            destination: CommandPath::parse(destination)?,
            overrides: None,
            description: None,
            aliases: Vec::new(),
            required_context_types: Vec::new(),
        };
        entry.check()?;
        Ok(entry)
    }

    pub fn with_overrides(mut self, overrides: &str) -> Result<Self> {
        let path = CommandPath::parse(overrides)?;
        self.overrides = (!path.is_root()).then_some(path);
        self.check()?;
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self.check()?;
        Ok(self)
    }

    pub fn with_required_context_types(mut self, types: &[ContextType]) -> Self {
        self.required_context_types = types.to_vec();
        self
    }

    fn check(&self) -> Result<()> {
        if !self.source.is_root() && self.destination.is_root() && self.overrides.is_none() {
            return Err(PluginError::InvalidEntry(format!(
                "source '{}' has no destination",
                self.source
            )));
        }
        if self.source.is_root() && self.destination.is_root() && self.overrides.is_some() {
            return Err(PluginError::InvalidEntry(
                "root suppression cannot override a command".to_string(),
            ));
        }
        for alias in &self.aliases {
            let parsed = CommandPath::parse(alias)?;
            if parsed.len() != 1 {
                return Err(PluginError::InvalidEntry(format!(
                    "alias '{alias}' must be a single command token"
                )));
            }
        }
        Ok(())
    }

    pub fn source(&self) -> &CommandPath {
        &self.source
    }

    pub fn destination(&self) -> &CommandPath {
        &self.destination
    }

    pub fn overrides(&self) -> Option<&CommandPath> {
        self.overrides.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn required_context_types(&self) -> &[ContextType] {
        &self.required_context_types
    }

    /// The `"" -> ""` form: drop the plugin's root command entirely.
    pub fn is_root_suppression(&self) -> bool {
        self.source.is_root() && self.destination.is_root() && self.overrides.is_none()
    }

    /// The host path this entry writes to: `overrides` when given, else the destination.
    pub fn resolution_target(&self) -> &CommandPath {
        self.overrides.as_ref().unwrap_or(&self.destination)
    }
}

impl TryFrom<RawCommandMapEntry> for CommandMapEntry {
    type Error = PluginError;

    fn try_from(raw: RawCommandMapEntry) -> Result<Self> {
        let overrides = match raw.overrides.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(path) => Some(CommandPath::parse(path)?),
        };
        let entry = Self {
            source: CommandPath::parse(&raw.source_command_path)?,
            destination: CommandPath::parse(&raw.destination_command_path)?,
            overrides,
            description: raw.description,
            aliases: raw.aliases,
            required_context_types: raw.required_context_types,
        };
        entry.check()?;
        Ok(entry)
    }
}

impl From<CommandMapEntry> for RawCommandMapEntry {
    fn from(entry: CommandMapEntry) -> Self {
        Self {
            source_command_path: entry.source.to_string(),
            destination_command_path: entry.destination.to_string(),
            overrides: entry.overrides.map(|p| p.to_string()),
            description: entry.description,
            aliases: entry.aliases,
            required_context_types: entry.required_context_types,
        }
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    pub conflict_policy: ConflictPolicy,
    pub active_context: Option<ContextType>,
}

/// Merge one plugin into `tree`.
///
/// The plugin root is attached under its target's default parent unless an
/// active entry remaps or suppresses the root (an entry with an empty source).
/// Entries then run in declared order. The returned diagnostics record every
/// override, omission and skipped entry.
pub fn apply(
    descriptor: &PluginDescriptor,
    tree: &mut CommandTree,
    options: ApplyOptions,
) -> Vec<Diagnostic> {
    let plugin = descriptor.name.as_str();
    let plugin_tree = descriptor.command_tree();
    let mut diagnostics = Vec::new();

    // Entries gated off by context take no part, root remaps included.
    let root_remapped = descriptor
        .command_map
        .iter()
        .any(|e| e.source().is_root() && context::entry_is_active(e, options.active_context));
    if !root_remapped {
        let target = descriptor.target.default_parent().join(plugin);
        let attachment = Attachment {
            plugin,
            source: &plugin_tree,
            target: &target,
            entry: None,
        };
        record(
            &mut diagnostics,
            plugin,
            None,
            attachment.attach(tree, options.conflict_policy),
        );
    }

    for (index, entry) in descriptor.command_map.iter().enumerate() {
        if !context::entry_is_active(entry, options.active_context) {
            debug!(plugin, entry = index, "command map entry inactive for context");
            diagnostics.push(Diagnostic::new(
                plugin,
                DiagnosticKind::EntryInactive {
                    entry: index,
                    required: entry.required_context_types().to_vec(),
                },
            ));
            continue;
        }

        let Some(source) = plugin_tree.get(entry.source()) else {
            let error = CommandMapError::SourceNotFound {
                plugin: plugin.to_string(),
                source_path: entry.source().clone(),
            };
            record(&mut diagnostics, plugin, Some(index), Err(error));
            continue;
        };

        if entry.is_root_suppression() {
            debug!(plugin, "root command mapping suppressed");
            diagnostics.push(Diagnostic::new(plugin, DiagnosticKind::RootSuppressed));
            continue;
        }

        let attachment = Attachment {
            plugin,
            source,
            target: entry.resolution_target(),
            entry: Some(entry),
        };
        record(
            &mut diagnostics,
            plugin,
            Some(index),
            attachment.attach(tree, options.conflict_policy),
        );
    }

    diagnostics
}

fn record(
    diagnostics: &mut Vec<Diagnostic>,
    plugin: &str,
    entry: Option<usize>,
    outcome: std::result::Result<Option<Diagnostic>, CommandMapError>,
) {
    match outcome {
        Ok(Some(diagnostic)) => diagnostics.push(diagnostic),
        Ok(None) => {}
        Err(error) => {
            warn!(plugin, ?entry, %error, "command map entry skipped");
            diagnostics.push(Diagnostic::new(
                plugin,
                DiagnosticKind::EntryFailed { entry, error },
            ));
        }
    }
}

/// One subtree being placed at one host path.
struct Attachment<'a> {
    plugin: &'a str,
    source: &'a CommandNode,
    target: &'a CommandPath,
    /// `None` for the default root attachment.
    entry: Option<&'a CommandMapEntry>,
}

impl Attachment<'_> {
    fn source_path(&self) -> CommandPath {
        match &self.source.origin {
            Origin::Plugin { source, .. } => source.clone(),
            Origin::Host => CommandPath::root(),
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> CommandMapError {
        CommandMapError::InvalidDestination {
            path: self.target.clone(),
            reason: reason.into(),
        }
    }

    /// Place the subtree. Returns an override diagnostic when a command was replaced.
    fn attach(
        &self,
        tree: &mut CommandTree,
        policy: ConflictPolicy,
    ) -> std::result::Result<Option<Diagnostic>, CommandMapError> {
        let (Some(parent_path), Some(name)) = (self.target.parent(), self.target.last()) else {
            return Err(self.invalid("the root command cannot be replaced"));
        };

        self.check_containment(tree, &parent_path)?;

        let Some(parent) = tree.get_mut(&parent_path) else {
            return Err(self.invalid(format!("parent command '{parent_path}' does not exist")));
        };

        let explicit = self.entry.is_some_and(|e| e.overrides().is_some());
        if let Some(existing) = parent.children.get(name) {
            if policy == ConflictPolicy::Reject && !explicit {
                return Err(CommandMapError::DestinationConflict {
                    path: self.target.clone(),
                    existing: existing.origin.label(),
                });
            }
        }

        let mut node = self.source.clone();
        node.name = name.to_string();
        if let Some(entry) = self.entry {
            // A mapping is an explicit exposure, even of a hidden command.
            node.hidden = false;
            if let Some(description) = entry.description() {
                node.description = Some(description.to_string());
            }
            if !entry.aliases().is_empty() {
                node.aliases = entry.aliases().to_vec();
            }
        }

        debug!(plugin = self.plugin, target = %self.target, "attached plugin command");
        let replaced = parent.children.insert(name.to_string(), node);

        Ok(replaced.map(|old| {
            let diagnostic = Diagnostic::new(
                self.plugin,
                DiagnosticKind::Override {
                    path: self.target.clone(),
                    replaced: old.origin.label(),
                    explicit,
                },
            );
            warn!("{diagnostic}");
            diagnostic
        }))
    }

    /// Reject targets that would sit inside this plugin's own placement of the
    /// same source subtree.
    fn check_containment(
        &self,
        tree: &CommandTree,
        parent_path: &CommandPath,
    ) -> std::result::Result<(), CommandMapError> {
        let source_path = self.source_path();
        let mut node = &tree.root;
        for token in parent_path.tokens() {
            let Some(child) = node.children.get(token) else {
                return Ok(());
            };
            if let Origin::Plugin { plugin, source, .. } = &child.origin {
                if plugin == self.plugin && source.starts_with(&source_path) {
                    return Err(self.invalid(format!(
                        "would place '{source_path}' inside its own attachment"
                    )));
                }
            }
            node = child;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_tree::CommandSpec;
    use crate::types::Target;

    fn p(raw: &str) -> CommandPath {
        CommandPath::parse(raw).unwrap()
    }

    fn host() -> CommandTree {
        let mut tree = CommandTree::new("tanzu");
        tree.add_host_command(&p("plugin"), Some("Manage plugins"));
        tree.add_host_command(&p("operations"), None);
        tree
    }

    fn foo(command_map: Vec<CommandMapEntry>) -> PluginDescriptor {
        let mut echo = CommandSpec::new("echo");
        echo.description = Some("Echo things".to_string());
        echo.subcommands.push(CommandSpec::new("loud"));
        let mut descriptor = PluginDescriptor::new("foo", Target::Global, "v1.0.0");
        descriptor.commands = vec![echo];
        descriptor.command_map = command_map;
        descriptor
    }

    fn paths(tree: &CommandTree) -> Vec<String> {
        tree.visible_paths().iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn default_attachment_uses_plugin_name() {
        let mut tree = host();
        let diags = apply(&foo(vec![]), &mut tree, ApplyOptions::default());
        assert!(diags.is_empty());
        assert!(tree.contains(&p("foo echo loud")));
    }

    #[test]
    fn default_attachment_follows_target() {
        let mut tree = host();
        let mut descriptor = foo(vec![]);
        descriptor.target = Target::Operations;
        apply(&descriptor, &mut tree, ApplyOptions::default());
        assert!(tree.contains(&p("operations foo echo")));
        assert!(!tree.contains(&p("foo")));
    }

    #[test]
    fn missing_target_parent_is_invalid_destination() {
        let mut tree = host();
        let mut descriptor = foo(vec![]);
        descriptor.target = Target::MissionControl;
        let diags = apply(&descriptor, &mut tree, ApplyOptions::default());
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            diags[0].kind,
            DiagnosticKind::EntryFailed {
                entry: None,
                error: CommandMapError::InvalidDestination { .. }
            }
        ));
    }

    #[test]
    fn root_suppression_leaves_tree_unchanged() {
        let mut tree = host();
        let before = tree.clone();
        let entry = CommandMapEntry::new("", "").unwrap();
        let diags = apply(&foo(vec![entry]), &mut tree, ApplyOptions::default());
        assert_eq!(tree, before);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::RootSuppressed);
    }

    #[test]
    fn root_remap_moves_plugin() {
        let mut tree = host();
        let entry = CommandMapEntry::new("", "bar").unwrap();
        apply(&foo(vec![entry]), &mut tree, ApplyOptions::default());
        assert_eq!(
            paths(&tree),
            ["bar", "bar echo", "bar echo loud", "operations", "plugin"]
        );
    }

    #[test]
    fn subcommand_mapped_to_root_keeps_original() {
        let mut tree = host();
        let entry = CommandMapEntry::new("echo", "echo")
            .unwrap()
            .with_description("Echo at the top level");
        apply(&foo(vec![entry]), &mut tree, ApplyOptions::default());
        assert!(tree.contains(&p("echo loud")));
        assert!(tree.contains(&p("foo echo")));
        assert_eq!(
            tree.get(&p("echo")).unwrap().description.as_deref(),
            Some("Echo at the top level")
        );
        assert_eq!(
            tree.get(&p("foo echo")).unwrap().description.as_deref(),
            Some("Echo things")
        );
    }

    #[test]
    fn hidden_source_only_visible_at_mapped_location() {
        let mut tree = host();
        let mut descriptor = foo(vec![CommandMapEntry::new("echo", "echo").unwrap()]);
        descriptor.commands[0].hidden = true;
        apply(&descriptor, &mut tree, ApplyOptions::default());
        let visible = paths(&tree);
        assert!(visible.contains(&"echo".to_string()));
        assert!(!visible.contains(&"foo echo".to_string()));
        assert!(tree.contains(&p("foo echo")));
    }

    #[test]
    fn missing_source_is_skipped_and_later_entries_run() {
        let mut tree = host();
        let entries = vec![
            CommandMapEntry::new("nope", "nope").unwrap(),
            CommandMapEntry::new("echo", "shout").unwrap(),
        ];
        let diags = apply(&foo(entries), &mut tree, ApplyOptions::default());
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            &diags[0].kind,
            DiagnosticKind::EntryFailed {
                entry: Some(0),
                error: CommandMapError::SourceNotFound { .. }
            }
        ));
        assert!(tree.contains(&p("shout loud")));
    }

    #[test]
    fn missing_destination_parent_is_rejected() {
        let mut tree = host();
        let entry = CommandMapEntry::new("echo", "cluster echo").unwrap();
        let diags = apply(&foo(vec![entry]), &mut tree, ApplyOptions::default());
        assert!(matches!(
            &diags[0].kind,
            DiagnosticKind::EntryFailed {
                error: CommandMapError::InvalidDestination { .. },
                ..
            }
        ));
        assert!(!tree.contains(&p("cluster")));
    }

    #[test]
    fn second_plugin_wins_with_one_override() {
        let mut tree = host();
        let first = foo(vec![CommandMapEntry::new("echo", "echo").unwrap()]);
        let mut second = foo(vec![CommandMapEntry::new("echo", "echo").unwrap()]);
        second.name = "bar".to_string();

        let mut diags = apply(&first, &mut tree, ApplyOptions::default());
        diags.extend(apply(&second, &mut tree, ApplyOptions::default()));

        let overrides: Vec<&Diagnostic> = diags.iter().filter(|d| d.is_override()).collect();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].plugin, "bar");
        assert_eq!(
            tree.get(&p("echo")).unwrap().origin.plugin_name(),
            Some("bar")
        );
    }

    #[test]
    fn reject_policy_blocks_implicit_collisions() {
        let mut tree = host();
        let options = ApplyOptions {
            conflict_policy: ConflictPolicy::Reject,
            active_context: None,
        };
        let entry = CommandMapEntry::new("echo", "plugin").unwrap();
        let diags = apply(&foo(vec![entry]), &mut tree, options);
        assert!(matches!(
            &diags[0].kind,
            DiagnosticKind::EntryFailed {
                error: CommandMapError::DestinationConflict { .. },
                ..
            }
        ));
        assert_eq!(tree.get(&p("plugin")).unwrap().origin, Origin::Host);
    }

    #[test]
    fn explicit_override_allowed_under_reject_policy() {
        let mut tree = host();
        let options = ApplyOptions {
            conflict_policy: ConflictPolicy::Reject,
            active_context: None,
        };
        let entry = CommandMapEntry::new("echo", "echo")
            .unwrap()
            .with_overrides("plugin")
            .unwrap();
        let diags = apply(&foo(vec![entry]), &mut tree, options);
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            diags[0].kind,
            DiagnosticKind::Override { explicit: true, .. }
        ));
        assert!(tree.contains(&p("plugin loud")));
    }

    #[test]
    fn mapping_into_own_attachment_is_rejected() {
        let mut tree = host();
        let entry = CommandMapEntry::new("echo", "foo echo again").unwrap();
        let diags = apply(&foo(vec![entry]), &mut tree, ApplyOptions::default());
        assert!(matches!(
            &diags[0].kind,
            DiagnosticKind::EntryFailed {
                error: CommandMapError::InvalidDestination { .. },
                ..
            }
        ));
        assert!(!tree.contains(&p("foo echo again")));
    }

    #[test]
    fn root_mapped_inside_its_own_remap_is_rejected() {
        let mut tree = host();
        let entries = vec![
            CommandMapEntry::new("", "bar").unwrap(),
            CommandMapEntry::new("", "bar nested").unwrap(),
        ];
        let diags = apply(&foo(entries), &mut tree, ApplyOptions::default());
        assert_eq!(diags.len(), 1);
        assert!(!tree.contains(&p("bar nested")));
    }

    #[test]
    fn sibling_mapping_under_own_root_is_allowed() {
        let mut tree = host();
        let entry = CommandMapEntry::new("echo loud", "foo yell").unwrap();
        let diags = apply(&foo(vec![entry]), &mut tree, ApplyOptions::default());
        assert!(diags.is_empty());
        assert!(tree.contains(&p("foo yell")));
    }

    #[test]
    fn entry_context_requirement_skips_entry() {
        let mut tree = host();
        let entry = CommandMapEntry::new("echo", "echo")
            .unwrap()
            .with_required_context_types(&[ContextType::Kubernetes]);
        let diags = apply(&foo(vec![entry.clone()]), &mut tree, ApplyOptions::default());
        assert!(matches!(diags[0].kind, DiagnosticKind::EntryInactive { entry: 0, .. }));
        assert!(!tree.contains(&p("echo")));

        let mut tree = host();
        let options = ApplyOptions {
            active_context: Some(ContextType::Kubernetes),
            ..ApplyOptions::default()
        };
        apply(&foo(vec![entry]), &mut tree, options);
        assert!(tree.contains(&p("echo")));
    }

    #[test]
    fn gated_root_remap_keeps_default_attachment() {
        let entry = CommandMapEntry::new("", "bar")
            .unwrap()
            .with_required_context_types(&[ContextType::Kubernetes]);

        let mut tree = host();
        let diags = apply(&foo(vec![entry.clone()]), &mut tree, ApplyOptions::default());
        assert!(tree.contains(&p("foo echo loud")));
        assert!(!tree.contains(&p("bar")));
        assert_eq!(diags.len(), 1);
        assert!(matches!(diags[0].kind, DiagnosticKind::EntryInactive { entry: 0, .. }));

        let mut tree = host();
        let options = ApplyOptions {
            active_context: Some(ContextType::Kubernetes),
            ..ApplyOptions::default()
        };
        let diags = apply(&foo(vec![entry]), &mut tree, options);
        assert!(diags.is_empty());
        assert!(tree.contains(&p("bar echo loud")));
        assert!(!tree.contains(&p("foo")));
    }

    #[test]
    fn aliases_replace_source_aliases() {
        let mut tree = host();
        let entry = CommandMapEntry::new("echo", "echo")
            .unwrap()
            .with_aliases(["e"])
            .unwrap();
        apply(&foo(vec![entry]), &mut tree, ApplyOptions::default());
        assert_eq!(tree.get(&p("echo")).unwrap().aliases, ["e"]);
    }

    #[test]
    fn entry_constructor_validates() {
        assert!(CommandMapEntry::new("echo", "").is_err());
        assert!(CommandMapEntry::new("", "").unwrap().is_root_suppression());
        assert!(CommandMapEntry::new("", "")
            .unwrap()
            .with_overrides("plugin")
            .is_err());
        assert!(CommandMapEntry::new("echo", "echo")
            .unwrap()
            .with_aliases(["two words"])
            .is_err());
        assert!(CommandMapEntry::new("bad/path", "x").is_err());
    }

    #[test]
    fn entry_yaml_goes_through_validation() {
        let yaml = "source_command_path: echo\ndestination_command_path: echo\ndescription: Echo\n";
        let entry: CommandMapEntry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry.source(), &p("echo"));
        assert_eq!(entry.description(), Some("Echo"));

        let bad = "source_command_path: echo\n";
        assert!(serde_yaml::from_str::<CommandMapEntry>(bad).is_err());

        let typo = "source_command_path: echo\ndestination: echo\n";
        assert!(serde_yaml::from_str::<CommandMapEntry>(typo).is_err());
    }

    #[test]
    fn empty_overrides_string_is_ignored() {
        let yaml = "source_command_path: echo\ndestination_command_path: echo\noverrides: \"\"\n";
        let entry: CommandMapEntry = serde_yaml::from_str(yaml).unwrap();
        assert!(entry.overrides().is_none());
        assert_eq!(entry.resolution_target(), &p("echo"));
    }
}
