use crate::command_path::CommandPath;
use crate::types::Target;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

/// Who contributed a node to the merged tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    Host,
    Plugin {
        plugin: String,
        target: Target,
        /// Path of this node inside the plugin's own command tree.
        source: CommandPath,
    },
}

impl Origin {
    pub fn plugin_name(&self) -> Option<&str> {
        match self {
            Origin::Host => None,
            Origin::Plugin { plugin, .. } => Some(plugin),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Origin::Host => "host".to_string(),
            Origin::Plugin { plugin, target, .. } => format!("{plugin} ({target})"),
        }
    }
}

// ---------------------------------------------------------------------------
// CommandSpec
// ---------------------------------------------------------------------------

/// A command as a plugin declares it in its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandSpec>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            hidden: false,
            aliases: Vec::new(),
            subcommands: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// CommandNode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub origin: Origin,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, CommandNode>,
}

impl CommandNode {
    pub fn new(name: impl Into<String>, origin: Origin) -> Self {
        Self {
            name: name.into(),
            description: None,
            hidden: false,
            aliases: Vec::new(),
            origin,
            children: BTreeMap::new(),
        }
    }

    /// Build a plugin's own tree. The returned root is named after the plugin
    /// and every node records its path inside that tree.
    pub fn from_plugin_specs(
        plugin: &str,
        target: Target,
        description: Option<&str>,
        commands: &[CommandSpec],
    ) -> Self {
        let mut root = CommandNode::new(
            plugin,
            Origin::Plugin {
                plugin: plugin.to_string(),
                target,
                source: CommandPath::root(),
            },
        );
        root.description = description.map(str::to_string);
        for spec in commands {
            let child = Self::from_spec(plugin, target, &CommandPath::root(), spec);
            root.children.insert(child.name.clone(), child);
        }
        root
    }

    fn from_spec(plugin: &str, target: Target, parent: &CommandPath, spec: &CommandSpec) -> Self {
        let source = parent.join(spec.name.clone());
        let mut node = CommandNode::new(
            spec.name.clone(),
            Origin::Plugin {
                plugin: plugin.to_string(),
                target,
                source: source.clone(),
            },
        );
        node.description = spec.description.clone();
        node.hidden = spec.hidden;
        node.aliases = spec.aliases.clone();
        for sub in &spec.subcommands {
            let child = Self::from_spec(plugin, target, &source, sub);
            node.children.insert(child.name.clone(), child);
        }
        node
    }

    pub fn get(&self, path: &CommandPath) -> Option<&CommandNode> {
        path.tokens()
            .iter()
            .try_fold(self, |node, token| node.children.get(token))
    }

    pub fn get_mut(&mut self, path: &CommandPath) -> Option<&mut CommandNode> {
        let mut node = self;
        for token in path.tokens() {
            node = node.children.get_mut(token)?;
        }
        Some(node)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.values().map(CommandNode::size).sum::<usize>()
    }
}

// ---------------------------------------------------------------------------
// CommandTree
// ---------------------------------------------------------------------------

/// One line of a flattened tree listing.
#[derive(Debug, Clone)]
pub struct TreeLine<'a> {
    pub path: CommandPath,
    pub depth: usize,
    pub node: &'a CommandNode,
}

/// The host CLI's command tree, rooted at the host command itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandTree {
    pub root: CommandNode,
}

impl CommandTree {
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            root: CommandNode::new(host_name, Origin::Host),
        }
    }

    pub fn get(&self, path: &CommandPath) -> Option<&CommandNode> {
        self.root.get(path)
    }

    pub fn get_mut(&mut self, path: &CommandPath) -> Option<&mut CommandNode> {
        self.root.get_mut(path)
    }

    pub fn contains(&self, path: &CommandPath) -> bool {
        self.get(path).is_some()
    }

    /// Add a host command, creating missing intermediate commands along the way.
    pub fn add_host_command(&mut self, path: &CommandPath, description: Option<&str>) {
        let mut node = &mut self.root;
        for token in path.tokens() {
            node = node
                .children
                .entry(token.clone())
                .or_insert_with(|| CommandNode::new(token.clone(), Origin::Host));
        }
        if let Some(description) = description {
            node.description = Some(description.to_string());
        }
    }

    /// Depth-first listing in name order. Hidden subtrees are skipped unless
    /// `include_hidden` is set. The root itself is not listed.
    pub fn lines(&self, include_hidden: bool) -> Vec<TreeLine<'_>> {
        let mut out = Vec::new();
        collect_lines(&self.root, &CommandPath::root(), 0, include_hidden, &mut out);
        out
    }

    /// Paths of every visible command, excluding the root.
    pub fn visible_paths(&self) -> Vec<CommandPath> {
        self.lines(false).into_iter().map(|l| l.path).collect()
    }
}

fn collect_lines<'a>(
    node: &'a CommandNode,
    path: &CommandPath,
    depth: usize,
    include_hidden: bool,
    out: &mut Vec<TreeLine<'a>>,
) {
    for child in node.children.values() {
        if child.hidden && !include_hidden {
            continue;
        }
        let child_path = path.join(child.name.clone());
        out.push(TreeLine {
            path: child_path.clone(),
            depth,
            node: child,
        });
        collect_lines(child, &child_path, depth + 1, include_hidden, out);
    }
}
