use crate::output::print_json;
use anyhow::Context;
use plugtree_core::builder::{BuildOutput, TreeBuilder};
use plugtree_core::config::Config;
use plugtree_core::installed::InstalledPlugins;
use plugtree_core::types::ContextType;
use std::path::Path;

pub fn run(root: &Path, context: Option<ContextType>, all: bool, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let installed = InstalledPlugins::load(root).context("failed to load installed.yaml")?;
    let out = TreeBuilder::from_config(&config, context).build(installed.descriptors());

    if json {
        return print_json(&out);
    }
    print_tree(&out, all);
    Ok(())
}

fn print_tree(out: &BuildOutput, all: bool) {
    let lines = out.tree.lines(all);
    let width = lines
        .iter()
        .map(|l| l.depth * 2 + l.node.name.len())
        .max()
        .unwrap_or(0);

    match out.active_context {
        Some(ctx) => println!("{} (context: {ctx})", out.tree.root.name),
        None => println!("{}", out.tree.root.name),
    }
    for line in &lines {
        let node = line.node;
        let mut label = format!("{}{}", "  ".repeat(line.depth), node.name);
        if !node.aliases.is_empty() {
            label.push_str(&format!(" ({})", node.aliases.join(", ")));
        }
        let mut suffix = node.description.clone().unwrap_or_default();
        if let Some(plugin) = node.origin.plugin_name() {
            suffix.push_str(&format!(" [{plugin}]"));
        }
        if node.hidden {
            suffix.push_str(" (hidden)");
        }
        println!("  {:width$}  {}", label, suffix.trim_start(), width = width);
    }

    if !out.diagnostics.is_empty() {
        println!();
        for d in &out.diagnostics {
            println!("{d}");
        }
    }
}
